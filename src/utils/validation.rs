use crate::error::Result;
use validator::Validate;

/// Runs the derive-based field checks; any failure becomes the single
/// "required fields" validation error.
pub fn validate<T: Validate>(val: &T) -> Result<()> {
    val.validate()?;
    Ok(())
}
