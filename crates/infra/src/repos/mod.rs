pub mod applications;
pub mod assets;
pub mod awards;
pub mod club_members;
pub mod clubs;
pub mod comments;
pub mod expenses;
pub mod matches;
pub mod notifications;
pub mod posts;
pub mod questions;
pub mod tournaments;
pub mod users;

pub use applications::{ApplicationRepo, ApplicationStatus, CreateApplication, UpdateApplication};
pub use assets::{AssetRepo, CreateAsset};
pub use awards::{AwardRepo, CreateAward, UpdateAward};
pub use club_members::ClubMemberRepo;
pub use clubs::{ClubRepo, CreateClub};
pub use comments::CommentRepo;
pub use expenses::{CreateExpense, ExpenseRepo};
pub use matches::{CreateMatch, MatchRepo, MatchStatus};
pub use notifications::{CreateNotification, NotificationRepo};
pub use posts::{PostRepo, UpdatePost};
pub use questions::QuestionRepo;
pub use tournaments::{CreateTournament, TournamentRepo, TournamentStatus};
pub use users::{CreateUser, UpdateProfile, UserRepo};
