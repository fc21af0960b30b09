pub mod from_row;
pub mod session;
pub mod user;
pub mod weight;
pub mod workout;

pub use from_row::FromSqliteRow;
pub use session::{
    resolve_sets, CreateSession, SessionDetail, SessionSet, SessionSummary, SetInput,
    UpdateSession,
};
pub use user::{is_valid_email, AuthRequest, User, UserInfo};
pub use weight::{CreateWeightEntry, UpdateWeightEntry, WeightEntry};
pub use workout::{CreateWorkout, UpdateWorkout, Workout};
