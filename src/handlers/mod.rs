pub mod quiz;
pub mod session;
pub mod tip;

use crate::db::models::AuthUser;
use crate::rejections::AppError;

/// Mutations on a record are allowed only for administrators and the
/// record's author.
pub(crate) fn ensure_admin_or_author(user: &AuthUser, author_id: i64) -> Result<(), AppError> {
    if user.is_admin || user.id == author_id {
        Ok(())
    } else {
        tracing::warn!(
            "prohibited operation: user {} is not the author ({author_id}) nor an administrator",
            user.id
        );
        Err(AppError::Forbidden)
    }
}
