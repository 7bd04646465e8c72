use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;

use ems::Config;

fn clear_env() {
    for key in [
        "DATABASE_URL",
        "JWT_SECRET",
        "JWT_EXPIRATION_DAYS",
        "HOST",
        "PORT",
        "ENVIRONMENT",
        "UPLOAD_DIR",
        "ADMIN_EMAIL",
        "ADMIN_PASSWORD",
    ] {
        unsafe { env::remove_var(key) };
    }
}

#[test]
#[serial]
fn defaults_apply_when_env_is_empty() {
    clear_env();

    let config = Config::from_env_only().unwrap();
    assert_eq!(config.database_url, "sqlite:ems.db");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.environment, "development");
    assert_eq!(config.upload_dir, "uploads/images");
    assert_eq!(config.admin_email, None);
    assert!(config.is_development());
    assert_eq!(config.server_address(), "127.0.0.1:8080");
}

#[test]
#[serial]
fn environment_overrides_are_honored() {
    clear_env();
    unsafe {
        env::set_var("DATABASE_URL", "sqlite:other.db");
        env::set_var("PORT", "9000");
        env::set_var("ENVIRONMENT", "production");
        env::set_var("UPLOAD_DIR", "/var/data/images");
        env::set_var("ADMIN_EMAIL", "root@example.com");
    }

    let config = Config::from_env_only().unwrap();
    assert_eq!(config.database_url, "sqlite:other.db");
    assert_eq!(config.port, 9000);
    assert!(config.is_production());
    assert_eq!(config.upload_dir, "/var/data/images");
    assert_eq!(config.admin_email.as_deref(), Some("root@example.com"));

    clear_env();
}

#[test]
#[serial]
fn invalid_port_falls_back_to_default() {
    clear_env();
    unsafe { env::set_var("PORT", "not-a-port") };

    let config = Config::from_env_only().unwrap();
    assert_eq!(config.port, 8080);

    clear_env();
}
