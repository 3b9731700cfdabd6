use super::parser::{parse_device_list, parse_prop_list, split_value};
use super::r#trait::DeviceSource;
use crate::error::{XinputError, Result};
use crate::model::{Device, Prop};
use crate::utils::environment::build_env_overrides;
use crate::xinput_error;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info};

/// Источник устройств поверх утилиты `xinput`
pub struct XinputSource {
    binary: String,
}

impl XinputSource {
    pub fn new(binary: &str) -> Self {
        info!("Инициализация XinputSource (binary: {})", binary);
        Self {
            binary: binary.to_string(),
        }
    }

    fn create_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);

        for (key, value) in build_env_overrides() {
            cmd.env(key, value);
        }

        cmd
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("{} {}", self.binary, args.join(" "));
        debug!("Запуск: {}", command_line);

        let output = self.create_command(args).output().await?;
        check_status(command_line, output)
    }
}

fn check_status(command: String, output: Output) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!("{} вернул ошибку: {}", command, stderr);
        return Err(XinputError::CommandFailed {
            command,
            code: output.status.code(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[async_trait::async_trait]
impl DeviceSource for XinputSource {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        let stdout = self.run(&["list", "--short"]).await?;
        let devices = parse_device_list(&stdout);
        // Виртуальные core-устройства есть всегда, пустой результат при непустом выводе означает чужой формат
        if devices.is_empty() && !stdout.trim().is_empty() {
            return Err(xinput_error!(parse, "ни одной строки устройства в выводе `xinput list`"));
        }
        debug!("xinput list: {} устройств", devices.len());
        Ok(devices)
    }

    async fn list_props(&self, device_id: u32) -> Result<Vec<Prop>> {
        let id = device_id.to_string();
        let stdout = self.run(&["list-props", id.as_str()]).await?;
        let props = parse_prop_list(&stdout);
        debug!("xinput list-props {}: {} свойств", device_id, props.len());
        Ok(props)
    }

    async fn set_prop(&self, device_id: u32, prop_id: u32, value: &str) -> Result<()> {
        let tokens = split_value(value);
        if tokens.is_empty() {
            return Err(XinputError::EmptyValue(prop_id));
        }

        let device = device_id.to_string();
        let prop = prop_id.to_string();
        let mut args: Vec<&str> = vec!["set-prop", device.as_str(), prop.as_str()];
        args.extend(tokens.iter().map(String::as_str));

        self.run(&args).await?;
        info!("Свойство {} устройства {} установлено в {:?}", prop_id, device_id, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_io_error() {
        let source = XinputSource::new("/non/existent/xinput");
        let result = source.list_devices().await;
        assert!(matches!(result, Err(XinputError::Io(_))));
    }

    #[tokio::test]
    async fn test_empty_value_rejected_before_spawn() {
        let source = XinputSource::new("/non/existent/xinput");
        let result = source.set_prop(1, 10, " , ").await;
        assert!(matches!(result, Err(XinputError::EmptyValue(10))));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_command_failed() {
        // `false` игнорирует аргументы и всегда завершается с кодом 1
        let source = XinputSource::new("false");
        let result = source.list_props(99).await;
        match result {
            Err(XinputError::CommandFailed { command, code, .. }) => {
                assert_eq!(command, "false list-props 99");
                assert_eq!(code, Some(1));
            }
            other => panic!("ожидалась CommandFailed, получено {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unrecognized_output_is_parse_error() {
        // `echo` печатает свои аргументы вместо списка устройств
        let source = XinputSource::new("echo");
        let result = source.list_devices().await;
        assert!(matches!(result, Err(XinputError::Parse(_))));
    }

    #[tokio::test]
    async fn test_props_output_without_matches_is_empty() {
        let source = XinputSource::new("echo");
        let props = source.list_props(3).await.unwrap();
        assert!(props.is_empty());
    }
}
