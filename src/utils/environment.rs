use crate::error::{XinputError, Result};
use std::collections::HashMap;
use std::process::Command;
use tracing::{debug, info, warn};

/// Проверить окружение перед запуском интерфейса: X-сервер и наличие xinput
pub fn check_environment(xinput_binary: &str) -> Result<()> {
    info!("Проверка окружения...");

    check_display();
    check_session_type();
    check_xinput(xinput_binary)?;

    info!("Проверка окружения завершена успешно");
    Ok(())
}

fn check_display() {
    match std::env::var("DISPLAY") {
        Ok(value) if !value.is_empty() => {
            info!("DISPLAY={}", value);
        }
        _ => {
            warn!("Переменная DISPLAY не задана - xinput не сможет подключиться к X-серверу");
        }
    }
}

fn check_session_type() {
    if std::env::var("XDG_SESSION_TYPE").as_deref() == Ok("wayland") {
        warn!("Сессия Wayland: xinput видит только устройства XWayland");
        warn!("   Изменения свойств затронут только X11-приложения");
    }
}

fn check_xinput(binary: &str) -> Result<()> {
    let output = Command::new(binary)
        .arg("--version")
        .envs(build_env_overrides())
        .output()
        .map_err(|e| {
            XinputError::Config(anyhow::anyhow!(
                "Не удалось запустить {}: {}. Установите пакет xinput (x11-xserver-utils)",
                binary,
                e
            ))
        })?;

    let version = String::from_utf8_lossy(&output.stdout);
    if let Some(first_line) = version.lines().next() {
        info!("Найден {}", first_line.trim());
    }

    if !output.status.success() {
        warn!(
            "{} --version завершился с кодом {:?}: {}",
            binary,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        warn!("   Вызовы xinput, скорее всего, будут завершаться ошибкой");
    }

    Ok(())
}

/// Переменные окружения для подпроцессов xinput.
///
/// При запуске через sudo X-сервер пользователя недоступен без его DISPLAY и XAUTHORITY,
/// поэтому пробрасываем их явно.
pub fn build_env_overrides() -> HashMap<String, String> {
    let mut env_vars = HashMap::new();

    if let Ok(display_var) = std::env::var("DISPLAY") {
        env_vars.insert("DISPLAY".to_string(), display_var);
    }

    match std::env::var("XAUTHORITY") {
        Ok(xauthority) => {
            env_vars.insert("XAUTHORITY".to_string(), xauthority);
        }
        Err(_) => {
            if let Ok(sudo_user) = std::env::var("SUDO_USER") {
                match user_home(&sudo_user) {
                    Some(home) => {
                        let xauthority = format!("{}/.Xauthority", home);
                        debug!("Подставляем XAUTHORITY для пользователя {}: {}", sudo_user, xauthority);
                        env_vars.insert("XAUTHORITY".to_string(), xauthority);
                    }
                    None => debug!("Домашний каталог пользователя {} не найден, XAUTHORITY не задан", sudo_user),
                }
            }
        }
    }

    env_vars
}

/// Домашний каталог пользователя по базе `getent passwd`
fn user_home(user: &str) -> Option<String> {
    let output = Command::new("getent").args(["passwd", user]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let entry = String::from_utf8(output.stdout).ok()?;
    home_from_passwd(entry.lines().next()?).map(str::to_string)
}

/// Шестое поле строки passwd: `name:x:uid:gid:gecos:home:shell`
fn home_from_passwd(entry: &str) -> Option<&str> {
    entry.trim().split(':').nth(5).filter(|home| !home.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_fails() {
        let result = check_xinput("/non/existent/xinput");
        assert!(matches!(result, Err(XinputError::Config(_))));
    }

    #[test]
    fn test_failing_version_is_not_fatal() {
        assert!(check_xinput("false").is_ok());
    }

    #[test]
    fn test_home_from_passwd() {
        assert_eq!(
            home_from_passwd("alice:x:1000:1000:Alice,,,:/srv/users/alice:/bin/bash\n"),
            Some("/srv/users/alice")
        );
        assert_eq!(home_from_passwd("root:x:0:0:root:/root:/bin/sh"), Some("/root"));
        assert_eq!(home_from_passwd("broken:x:1"), None);
        assert_eq!(home_from_passwd("nohome:x:1:1:::/bin/sh"), None);
    }

    #[test]
    fn test_user_home_unknown_user() {
        assert_eq!(user_home("no-such-user-xinput-tui"), None);
    }

    #[test]
    fn test_env_overrides_forward_display() {
        let env_vars = build_env_overrides();
        match std::env::var("DISPLAY") {
            Ok(value) => assert_eq!(env_vars.get("DISPLAY"), Some(&value)),
            Err(_) => assert!(!env_vars.contains_key("DISPLAY")),
        }
    }
}
