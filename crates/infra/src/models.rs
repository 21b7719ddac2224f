use crate::repos::applications::ApplicationStatus;
use crate::repos::matches::MatchStatus;
use crate::repos::tournaments::TournamentStatus;
use crate::standings::{GroupMatch, SetScore};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth: Option<NaiveDate>,
    pub rating: Option<i32>,
    pub address: Option<String>,
    pub level: i16,
    pub oauth_provider: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ClubRow {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ClubMemberRow {
    pub id: Uuid,
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TournamentRow {
    pub id: Uuid,
    pub club_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub status: TournamentStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub division: String,
    pub team_name: String,
    pub user_id: Uuid,
    pub status: ApplicationStatus,
    pub group_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub division: String,
    pub group_id: String,
    pub team_a: String,
    pub team_b: String,
    pub status: MatchStatus,
    pub set_scores: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchRow {
    /// Convert to the standings engine's input shape. The stored score is a
    /// JSON array of `[games_a, games_b]` pairs.
    pub fn to_group_match(&self) -> Result<GroupMatch, serde_json::Error> {
        let sets: Vec<SetScore> = match &self.set_scores {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Vec::new(),
        };

        Ok(GroupMatch {
            group_id: self.group_id.clone(),
            team_a: self.team_a.clone(),
            team_b: self.team_b.clone(),
            completed: self.status == MatchStatus::Completed,
            sets,
        })
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct NotificationRow {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub user_id: Option<Uuid>,
    pub required_level: Option<i16>,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    /// Visibility rule, the same predicate the repository queries apply in
    /// SQL: targeted at this user, or tiered at or below their level.
    pub fn is_visible_to(&self, user_id: Uuid, level: i16) -> bool {
        self.user_id == Some(user_id)
            || self.required_level.is_some_and(|required| required <= level)
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub answer: Option<String>,
    pub answered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AwardRow {
    pub id: Uuid,
    pub title: String,
    pub recipient: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: Uuid,
    pub amount_cents: i32,
    pub store_name: Option<String>,
    pub spent_at: Option<NaiveDate>,
    pub memo: Option<String>,
    pub receipt_url: Option<String>,
    pub recorded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AssetRow {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn notification(user_id: Option<Uuid>, required_level: Option<i16>) -> NotificationRow {
        NotificationRow {
            id: Uuid::new_v4(),
            kind: "test".to_string(),
            title: "Title".to_string(),
            message: "Message".to_string(),
            user_id,
            required_level,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn tiered_notification_respects_the_level_threshold() {
        let admin_only = notification(None, Some(5));
        let viewer = Uuid::new_v4();

        assert!(!admin_only.is_visible_to(viewer, 1));
        assert!(!admin_only.is_visible_to(viewer, 4));
        assert!(admin_only.is_visible_to(viewer, 5));

        let member_wide = notification(None, Some(1));
        assert!(!member_wide.is_visible_to(viewer, 0));
        assert!(member_wide.is_visible_to(viewer, 1));
        assert!(member_wide.is_visible_to(viewer, 5));
    }

    #[test]
    fn targeted_notification_is_visible_only_to_its_recipient() {
        let recipient = Uuid::new_v4();
        let targeted = notification(Some(recipient), None);

        assert!(targeted.is_visible_to(recipient, 0));
        // Even an administrator does not see someone else's targeted row.
        assert!(!targeted.is_visible_to(Uuid::new_v4(), 5));
    }
}
