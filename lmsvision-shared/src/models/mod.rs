/// Database models for LMSVision
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: Learner accounts
/// - `admin`: Administrator accounts
/// - `course`: Course catalog entries
/// - `enrollment`: `course_progress` rows linking users to courses

pub mod admin;
pub mod course;
pub mod enrollment;
pub mod user;
