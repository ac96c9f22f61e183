use crate::error::AppError;
use crate::notify::Notifier;
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, title: &str, subtitle: &str, message: &str) -> Result<(), AppError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(title)
            .text1(subtitle)
            .text2(message)
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;

        Ok(())
    }
}
