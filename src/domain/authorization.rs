/// Role names carried in tokens
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";

    /// Role implied by a token's admin flag
    pub fn role_for(is_admin: bool) -> &'static str {
        if is_admin {
            ADMIN
        } else {
            USER
        }
    }
}

/// User context extracted from authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub username: String,
    pub role: &'static str,
}

impl UserContext {
    pub fn new(username: String, is_admin: bool) -> Self {
        Self {
            username,
            role: roles::role_for(is_admin),
        }
    }

    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Admins may create, update and delete companies and jobs
    pub fn is_admin(&self) -> bool {
        self.has_role(roles::ADMIN)
    }
}

/// Authorization result
#[derive(Debug, PartialEq, Eq)]
pub enum AuthorizationResult {
    Allowed,
    Unauthorized(String),
}

impl AuthorizationResult {
    /// Only admins pass; anonymous and regular users are both unauthorized
    pub fn check_admin(context: Option<&UserContext>) -> Self {
        match context {
            Some(ctx) if ctx.is_admin() => Self::Allowed,
            Some(ctx) => Self::Unauthorized(format!("User {} is not an admin", ctx.username)),
            None => Self::Unauthorized("Authentication required".to_string()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}
