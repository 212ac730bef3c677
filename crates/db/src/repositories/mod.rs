mod complaint_repo;
mod user_repo;

pub use complaint_repo::ComplaintRepo;
pub use user_repo::UserRepo;
