//! Writing, editing, and deleting comments, with their photo attachments.

pub mod draft;
pub mod photos;
pub mod workflow;

pub use draft::{CommentDraft, DraftMode, overall_score};
pub use photos::{
    MAX_PHOTOS, PreviewHandle, PreviewTracker, StagedPhoto, accepted_mime, mime_from_path,
};
pub use workflow::{DraftState, SubmissionWorkflow, SubmitOutcome};
