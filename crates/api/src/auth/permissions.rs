//! The authorization gate. Every gated handler resolves the caller here
//! before touching domain state: session -> fresh user row -> level or
//! ownership check.

use serde_json::Value;
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;
use infra::models::UserRow;
use infra::repos::UserRepo;

/// Permission tiers, the single definition site for the numeric policy
/// table. Higher levels subsume lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Unapproved / no account.
    Guest,
    /// Approved member: comments, own applications, base reads.
    Member,
    /// May view their own submitted inquiries.
    Elevated,
    /// Manages awards.
    Advanced,
    /// Lists all inquiries.
    Moderator,
    /// Destructive/global operations.
    Admin,
}

impl Level {
    pub const fn as_i16(self) -> i16 {
        match self {
            Level::Guest => 0,
            Level::Member => 1,
            Level::Elevated => 2,
            Level::Advanced => 3,
            Level::Moderator => 4,
            Level::Admin => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Guest => "guest",
            Level::Member => "member",
            Level::Elevated => "elevated member",
            Level::Advanced => "advanced member",
            Level::Moderator => "moderator",
            Level::Admin => "administrator",
        }
    }
}

/// Whether a stored user level satisfies a required minimum.
pub fn level_satisfies(user_level: i16, min: Level) -> bool {
    user_level >= min.as_i16()
}

/// Re-fetch the authoritative user record and check it against `min`.
///
/// The claims-level snapshot is never consulted: it can be stale relative
/// to the users table. A session whose user row has disappeared (deleted
/// mid-session) is authenticated but not authorized, so it fails with
/// `Forbidden`, not `Unauthenticated`.
pub async fn require_level(
    state: &AppState,
    claims: &Claims,
    min: Level,
) -> Result<UserRow, AppError> {
    let user_id = claims.user_id()?;

    let user = UserRepo::new(state.db.clone())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("account no longer exists".to_string()))?;

    if !level_satisfies(user.level, min) {
        return Err(AppError::Forbidden(format!(
            "{} access required",
            min.name()
        )));
    }

    Ok(user)
}

/// An owner reference as it arrives from clients. Documents migrated from
/// the old content store carry owners as a raw id string, `{"_ref": id}`
/// or `{"_id": id}`; everything is normalized to a `Uuid` here, never
/// compared in mixed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerRef(Uuid);

impl OwnerRef {
    pub fn id(&self) -> Uuid {
        self.0
    }

    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let raw = match value {
            Value::String(s) => s.as_str(),
            Value::Object(map) => map
                .get("_ref")
                .or_else(|| map.get("_id"))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    AppError::Validation("owner reference object carries no id".to_string())
                })?,
            _ => {
                return Err(AppError::Validation(
                    "unsupported owner reference shape".to_string(),
                ))
            }
        };

        Uuid::parse_str(raw)
            .map(OwnerRef)
            .map_err(|e| AppError::Validation(format!("invalid owner id: {}", e)))
    }
}

impl From<Uuid> for OwnerRef {
    fn from(id: Uuid) -> Self {
        OwnerRef(id)
    }
}

/// Admit when the caller is an administrator or owns the resource.
pub fn check_ownership_or_admin(user: &UserRow, owner: &OwnerRef) -> Result<(), AppError> {
    if level_satisfies(user.level, Level::Admin) || user.id == owner.id() {
        return Ok(());
    }

    Err(AppError::Forbidden(
        "you may only modify your own resources".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn user(level: i16) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "member@club.test".to_string(),
            name: "Test Member".to_string(),
            phone: None,
            gender: None,
            birth: None,
            rating: None,
            address: None,
            level,
            oauth_provider: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn levels_are_supersets() {
        for min in [
            Level::Guest,
            Level::Member,
            Level::Elevated,
            Level::Advanced,
            Level::Moderator,
            Level::Admin,
        ] {
            for user_level in 0..=5i16 {
                assert_eq!(
                    level_satisfies(user_level, min),
                    user_level >= min.as_i16(),
                    "level {user_level} vs {min:?}"
                );
            }
        }
    }

    #[test]
    fn owner_reference_shapes_normalize_to_the_same_id() {
        let id = Uuid::new_v4();

        let from_string = OwnerRef::from_value(&json!(id.to_string())).unwrap();
        let from_ref = OwnerRef::from_value(&json!({ "_ref": id.to_string() })).unwrap();
        let from_embedded = OwnerRef::from_value(&json!({ "_id": id.to_string() })).unwrap();

        assert_eq!(from_string, OwnerRef::from(id));
        assert_eq!(from_ref, OwnerRef::from(id));
        assert_eq!(from_embedded, OwnerRef::from(id));
    }

    #[test]
    fn malformed_owner_references_are_rejected() {
        assert!(matches!(
            OwnerRef::from_value(&json!(42)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            OwnerRef::from_value(&json!({ "name": "someone" })),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            OwnerRef::from_value(&json!("not-a-uuid")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn owner_or_admin_admits_correctly() {
        let owner_id = Uuid::new_v4();
        let owner_ref = OwnerRef::from(owner_id);

        // The owner at base level is admitted.
        let mut owner = user(1);
        owner.id = owner_id;
        assert!(check_ownership_or_admin(&owner, &owner_ref).is_ok());

        // A stranger below admin is not, whatever their level short of 5.
        for level in 0..5i16 {
            let stranger = user(level);
            assert!(
                check_ownership_or_admin(&stranger, &owner_ref).is_err(),
                "level {level}"
            );
        }

        // An administrator is admitted regardless of ownership.
        let admin = user(5);
        assert!(check_ownership_or_admin(&admin, &owner_ref).is_ok());
    }
}
