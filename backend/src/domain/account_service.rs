//! Account and session management.
//!
//! A session moves from unauthenticated to authenticated on login and back on
//! logout. Sessions do not expire.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use crate::domain::audit_service::AuditService;
use crate::domain::commands::auth::{
    LoginCommand, LoginResult, LogoutResult, RegisterCommand, RegisterResult,
};
use crate::domain::credential_service::CredentialService;
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::models::user::normalize_username;
use crate::domain::models::{AuditAction, Identity};
use crate::storage::UserRepository;

const MAX_USERNAME_LENGTH: usize = 64;

#[derive(Clone)]
pub struct AccountService {
    credentials: CredentialService,
    users: Arc<dyn UserRepository>,
    audit: AuditService,
    sessions: Arc<Mutex<HashMap<String, Identity>>>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, audit: AuditService) -> Self {
        Self {
            credentials: CredentialService::new(Arc::clone(&users)),
            users,
            audit,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check credentials and open a session. Only a successful login is audited.
    pub fn login(&self, command: LoginCommand) -> DashboardResult<LoginResult> {
        let identity = self
            .credentials
            .authenticate(&command.username, &command.password)?;

        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id.clone(), identity.clone());

        self.audit.record(&identity.username, AuditAction::Login, "");
        info!("Opened session for {}", identity.username);

        Ok(LoginResult {
            session_id,
            identity,
        })
    }

    pub fn logout(&self, session_id: &str) -> DashboardResult<LogoutResult> {
        let identity = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
            .ok_or(DashboardError::NotAuthenticated)?;

        self.audit.record(&identity.username, AuditAction::Logout, "");
        info!("Closed session for {}", identity.username);

        Ok(LogoutResult {
            success_message: format!("{} logged out", identity.username),
            identity,
        })
    }

    /// Create a new `user` account. The caller logs in separately.
    pub fn register(&self, command: RegisterCommand) -> DashboardResult<RegisterResult> {
        let username = normalize_username(&command.username);
        validate_username(&username)?;
        if command.password.trim().is_empty() {
            return Err(DashboardError::InvalidInput("password must not be empty".to_string()));
        }

        if self.users.find_user(&username)?.is_some() {
            warn!("Registration rejected, username already exists: {}", username);
            return Err(DashboardError::DuplicateUser(username));
        }

        let user = self.users.add_user(&username, &command.password)?;
        self.audit.record(&user.username, AuditAction::Register, "");
        info!("Registered {}", user.username);

        Ok(RegisterResult {
            success_message: format!("Account created for {}. Please log in.", user.username),
            user,
        })
    }

    /// Identity behind an open session
    pub fn identity(&self, session_id: &str) -> DashboardResult<Identity> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
            .ok_or(DashboardError::NotAuthenticated)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

fn validate_username(username: &str) -> DashboardResult<()> {
    if username.is_empty() {
        return Err(DashboardError::InvalidInput("username must not be empty".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(DashboardError::InvalidInput(format!(
            "username must be at most {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(DashboardError::InvalidInput(
            "username may only contain letters, digits, '.', '_' and '-'".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit_service::tests::RecordingAuditStorage;
    use crate::domain::models::{Role, User};
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::csv::RecordRepository;
    use crate::storage::InMemoryUserRepository;

    fn in_memory() -> (AccountService, Arc<RecordingAuditStorage>) {
        let audit = Arc::new(RecordingAuditStorage::default());
        let users = Arc::new(InMemoryUserRepository::new(vec![
            User::new("sakshi", "sakshi123", Role::User),
            User::new("admin", "admin123", Role::Admin),
        ]));
        (AccountService::new(users, AuditService::new(audit.clone())), audit)
    }

    fn login(service: &AccountService, username: &str, password: &str) -> DashboardResult<LoginResult> {
        service.login(LoginCommand {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn register(service: &AccountService, username: &str, password: &str) -> DashboardResult<RegisterResult> {
        service.register(RegisterCommand {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[test]
    fn test_login_opens_session_and_audits() {
        let (service, audit) = in_memory();

        let result = login(&service, " Sakshi ", "sakshi123").unwrap();
        assert_eq!(result.identity.username, "sakshi");
        assert!(Uuid::parse_str(&result.session_id).is_ok());
        assert_eq!(service.identity(&result.session_id).unwrap(), result.identity);
        assert_eq!(audit.actions(), vec![("sakshi".to_string(), AuditAction::Login)]);
    }

    #[test]
    fn test_wrong_password_is_not_audited() {
        let (service, audit) = in_memory();

        let err = login(&service, "sakshi", "wrong").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidCredentials));
        assert!(audit.entries().is_empty());
        assert_eq!(service.active_sessions(), 0);
    }

    #[test]
    fn test_logout_ends_session() {
        let (service, audit) = in_memory();
        let session = login(&service, "sakshi", "sakshi123").unwrap().session_id;

        let result = service.logout(&session).unwrap();
        assert_eq!(result.identity.username, "sakshi");
        assert!(matches!(service.identity(&session), Err(DashboardError::NotAuthenticated)));
        assert!(matches!(service.logout(&session), Err(DashboardError::NotAuthenticated)));
        assert_eq!(audit.actions()[1], ("sakshi".to_string(), AuditAction::Logout));
    }

    #[test]
    fn test_sessions_are_independent() {
        let (service, _audit) = in_memory();
        let first = login(&service, "sakshi", "sakshi123").unwrap().session_id;
        let second = login(&service, "admin", "admin123").unwrap().session_id;
        assert_ne!(first, second);

        service.logout(&first).unwrap();
        assert!(service.identity(&second).unwrap().is_admin());
    }

    #[test]
    fn test_register_then_login() {
        let (service, audit) = in_memory();

        let result = register(&service, "Riya", "riya-pw").unwrap();
        assert_eq!(result.user.username, "riya");
        assert_eq!(result.user.role, Role::User);
        assert_eq!(audit.actions(), vec![("riya".to_string(), AuditAction::Register)]);

        assert!(login(&service, "riya", "riya-pw").is_ok());
    }

    #[test]
    fn test_register_validation() {
        let (service, audit) = in_memory();

        assert!(matches!(register(&service, "   ", "pw"), Err(DashboardError::InvalidInput(_))));
        assert!(matches!(register(&service, "riya", ""), Err(DashboardError::InvalidInput(_))));
        assert!(matches!(register(&service, "ri ya", "pw"), Err(DashboardError::InvalidInput(_))));
        assert!(matches!(register(&service, "../x", "pw"), Err(DashboardError::InvalidInput(_))));
        assert!(audit.entries().is_empty());
    }

    #[test]
    fn test_register_existing_user_leaves_store_unchanged() {
        let env = TestEnvironment::with_scenario().unwrap();
        let store = Arc::new(RecordRepository::new(env.connection.clone(), "s1.csv", None));
        let audit = Arc::new(RecordingAuditStorage::default());
        let service = AccountService::new(store, AuditService::new(audit.clone()));
        let before = env.read_file("s1.csv");

        let err = register(&service, "SAKSHI", "other").unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateUser(ref name) if name == "sakshi"));
        assert_eq!(env.read_file("s1.csv"), before);
        assert!(audit.entries().is_empty());
    }
}
