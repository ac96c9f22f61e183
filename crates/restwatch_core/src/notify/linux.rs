use crate::error::AppError;
use crate::notify::Notifier;
use notify_rust::Notification;

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, title: &str, subtitle: &str, message: &str) -> Result<(), AppError> {
        let body = if subtitle.trim().is_empty() {
            message.to_string()
        } else {
            format!("{subtitle}\n{message}")
        };

        Notification::new()
            .summary(title)
            .body(&body)
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;

        Ok(())
    }
}
