use crate::error::AppError;

/// Prompting seam between the core flows and whatever surface collects
/// user input. Implementations re-prompt until the input is valid; a value
/// returned from `prompt_integer` is already within `[min, max]`.
pub trait Interaction {
    fn prompt_integer(&mut self, message: &str, min: u64, max: u64) -> Result<u64, AppError>;

    fn prompt_text(&mut self, message: &str) -> Result<String, AppError>;

    fn confirm(&mut self, message: &str) -> Result<bool, AppError>;
}

pub fn range_error(min: u64, max: u64) -> AppError {
    AppError::invalid_input(format!(
        "Please enter a valid number between {min} and {max}."
    ))
}

/// Shared validation for prompt implementations: one raw line in, either a
/// value inside the range or the range-specific error out.
pub fn parse_integer_in_range(raw: &str, min: u64, max: u64) -> Result<u64, AppError> {
    let value: u64 = raw.trim().parse().map_err(|_| range_error(min, max))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(range_error(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::parse_integer_in_range;

    #[test]
    fn accepts_value_inside_range() {
        assert_eq!(parse_integer_in_range(" 15 ", 1, 20).unwrap(), 15);
        assert_eq!(parse_integer_in_range("1", 1, 20).unwrap(), 1);
        assert_eq!(parse_integer_in_range("20", 1, 20).unwrap(), 20);
    }

    #[test]
    fn rejects_value_outside_range() {
        let err = parse_integer_in_range("21", 1, 20).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert!(err.message().contains("between 1 and 20"));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = parse_integer_in_range("soon", 20, 60).unwrap_err();
        assert!(err.message().contains("between 20 and 60"));
    }

    #[test]
    fn rejects_negative_input() {
        assert!(parse_integer_in_range("-5", 1, 20).is_err());
    }
}
