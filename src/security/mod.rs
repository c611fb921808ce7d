mod admin_auth;

pub use admin_auth::{
    admin_auth_middleware, validate_admin, AdminCredentials, ADMIN_PASSWORD_HEADER,
    ADMIN_USERNAME_HEADER,
};
