use thiserror::Error;

#[derive(Error, Debug)]
pub enum XinputError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Команда `{command}` завершилась с кодом {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Не удалось разобрать вывод xinput: {0}")]
    Parse(String),

    #[error("Недопустимый переход: {0}")]
    InvalidTransition(String),

    #[error("Пустое значение для свойства {0}")]
    EmptyValue(u32),

    #[error("Ошибка терминала: {0}")]
    Terminal(String),
}

impl XinputError {
    pub fn invalid_transition<T>(msg: impl Into<String>) -> Result<T> {
        Err(XinputError::InvalidTransition(msg.into()))
    }

    /// Короткий текст для строки состояния. Подробности уходят в журнал.
    pub fn user_message(&self) -> String {
        match self {
            XinputError::Config(_) => "Configuration error, see the log for details".to_string(),
            XinputError::Io(e) => format!("I/O error: {}", e),
            XinputError::CommandFailed { command, code, stderr } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    format!("`{}` failed (exit {})", command, code)
                } else {
                    format!("`{}` failed (exit {}): {}", command, code, stderr)
                }
            }
            XinputError::Parse(_) => "Could not parse xinput output".to_string(),
            XinputError::InvalidTransition(_) => "Action is not available right now".to_string(),
            XinputError::EmptyValue(prop_id) => format!("Value for property {} is empty", prop_id),
            XinputError::Terminal(_) => "Terminal error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, XinputError>;

// Удобный макрос для создания ошибок
#[macro_export]
macro_rules! xinput_error {
    (parse, $($arg:tt)*) => {
        $crate::error::XinputError::Parse(format!($($arg)*))
    };
    (invalid_transition, $($arg:tt)*) => {
        $crate::error::XinputError::InvalidTransition(format!($($arg)*))
    };
    (terminal, $($arg:tt)*) => {
        $crate::error::XinputError::Terminal(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err = XinputError::CommandFailed {
            command: "xinput set-prop 1 10 2.0".to_string(),
            code: Some(1),
            stderr: "property not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("xinput set-prop 1 10 2.0"));
        assert!(msg.contains("property not found"));
    }

    #[test]
    fn test_user_message_keeps_command_details() {
        let err = XinputError::CommandFailed {
            command: "xinput set-prop 1 10 2.0".to_string(),
            code: Some(1),
            stderr: "property not found\n".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "`xinput set-prop 1 10 2.0` failed (exit 1): property not found"
        );
        assert_eq!(XinputError::EmptyValue(10).user_message(), "Value for property 10 is empty");
    }

    #[test]
    fn test_macro_builds_variant() {
        let err = xinput_error!(parse, "строка {}", 3);
        assert!(matches!(err, XinputError::Parse(ref s) if s == "строка 3"));
    }
}
