//! The comment form: three scored sections plus photo attachments.

use crate::api::{Comment, CommentRequest, PhotoUpload};
use crate::error::ValidationError;
use crate::submission::photos::{MAX_PHOTOS, PreviewTracker, StagedPhoto, accepted_mime};

/// Whether the draft creates a comment or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    New,
    Editing(u64),
}

/// `round((food + environment + visiting) / 3, 1)`
pub fn overall_score(food: u8, environment: u8, visiting: u8) -> f64 {
    let mean = (f64::from(food) + f64::from(environment) + f64::from(visiting)) / 3.0;
    (mean * 10.0).round() / 10.0
}

fn check_score(field: &'static str, score: Option<u8>) -> Result<u8, ValidationError> {
    match score {
        None => Err(ValidationError::MissingScore { field }),
        Some(value) if !(1..=5).contains(&value) => {
            Err(ValidationError::ScoreOutOfRange { field, value })
        }
        Some(value) => Ok(value),
    }
}

#[derive(Debug)]
pub struct CommentDraft {
    pub restaurant_id: u64,
    pub mode: DraftMode,
    pub food_comment: String,
    pub environment_comment: String,
    pub visiting_comment: String,
    pub food_score: Option<u8>,
    pub environment_score: Option<u8>,
    pub visiting_score: Option<u8>,
    /// URLs of photos already stored with the comment.
    pub existing_photos: Vec<String>,
    staged: Vec<StagedPhoto>,
}

impl CommentDraft {
    pub fn new(restaurant_id: u64) -> Self {
        Self {
            restaurant_id,
            mode: DraftMode::New,
            food_comment: String::new(),
            environment_comment: String::new(),
            visiting_comment: String::new(),
            food_score: None,
            environment_score: None,
            visiting_score: None,
            existing_photos: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Pre-populate every field from an existing comment.
    pub fn editing(comment: &Comment) -> Self {
        Self {
            restaurant_id: comment.restaurant_id,
            mode: DraftMode::Editing(comment.id),
            food_comment: comment.food_comment.clone().unwrap_or_default(),
            environment_comment: comment.environment_comment.clone().unwrap_or_default(),
            visiting_comment: comment.visiting_comment.clone().unwrap_or_default(),
            food_score: comment.food_score,
            environment_score: comment.environment_score,
            visiting_score: comment.visiting_score,
            existing_photos: comment.photos.clone(),
            staged: Vec::new(),
        }
    }

    pub fn set_scores(&mut self, food: u8, environment: u8, visiting: u8) {
        self.food_score = Some(food);
        self.environment_score = Some(environment);
        self.visiting_score = Some(visiting);
    }

    pub fn staged(&self) -> &[StagedPhoto] {
        &self.staged
    }

    pub(crate) fn staged_mut(&mut self) -> &mut Vec<StagedPhoto> {
        &mut self.staged
    }

    pub fn photo_count(&self) -> usize {
        self.existing_photos.len() + self.staged.len()
    }

    /// Stage a photo for upload. Checked locally: JPEG/PNG only, and at most
    /// seven photos across existing and staged.
    pub fn stage_photo(
        &mut self,
        tracker: &PreviewTracker,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<&StagedPhoto, ValidationError> {
        let mime = accepted_mime(mime)?;
        if self.photo_count() >= MAX_PHOTOS {
            return Err(ValidationError::TooManyPhotos { max: MAX_PHOTOS });
        }
        self.staged.push(StagedPhoto {
            upload: PhotoUpload {
                file_name: file_name.to_string(),
                mime: mime.to_string(),
                bytes,
            },
            preview: tracker.acquire(),
        });
        Ok(&self.staged[self.staged.len() - 1])
    }

    /// Unstage a photo, releasing its preview handle.
    pub fn remove_staged(&mut self, index: usize) -> Result<(), ValidationError> {
        if index >= self.staged.len() {
            return Err(ValidationError::NoSuchPhoto(index));
        }
        self.staged.remove(index);
        Ok(())
    }

    /// Drop an existing photo from the draft, freeing a slot.
    pub fn remove_existing(&mut self, index: usize) -> Result<String, ValidationError> {
        if index >= self.existing_photos.len() {
            return Err(ValidationError::NoSuchPhoto(index));
        }
        Ok(self.existing_photos.remove(index))
    }

    pub(crate) fn uploads(&self) -> Vec<PhotoUpload> {
        self.staged.iter().map(|p| p.upload.clone()).collect()
    }

    /// Build the request body, or the first failed check.
    pub fn to_request(&self) -> Result<CommentRequest, ValidationError> {
        let food = check_score("food", self.food_score)?;
        let environment = check_score("environment", self.environment_score)?;
        let visiting = check_score("visiting", self.visiting_score)?;
        Ok(CommentRequest {
            restaurant_id: self.restaurant_id,
            food_comment: self.food_comment.clone(),
            environment_comment: self.environment_comment.clone(),
            visiting_comment: self.visiting_comment.clone(),
            food_score: food,
            environment_score: environment,
            visiting_score: visiting,
            overall_score: overall_score(food, environment, visiting),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::comment_json;
    use proptest::prelude::*;

    #[test]
    fn test_overall_score_rounding() {
        assert_eq!(overall_score(4, 5, 3), 4.0);
        assert_eq!(overall_score(5, 5, 4), 4.7);
        assert_eq!(overall_score(1, 1, 2), 1.3);
        assert_eq!(overall_score(5, 5, 5), 5.0);
    }

    #[test]
    fn test_missing_score_blocks_request() {
        let mut draft = CommentDraft::new(7);
        draft.food_score = Some(4);
        draft.visiting_score = Some(3);
        assert_eq!(
            draft.to_request(),
            Err(ValidationError::MissingScore {
                field: "environment"
            })
        );
        draft.environment_score = Some(9);
        assert_eq!(
            draft.to_request(),
            Err(ValidationError::ScoreOutOfRange {
                field: "environment",
                value: 9
            })
        );
    }

    #[test]
    fn test_editing_prefills_everything() {
        let mut json = comment_json(10, 1, 7);
        json["photos"] = serde_json::json!(["/uploads/a.jpg", "/uploads/b.jpg"]);
        let comment: Comment = serde_json::from_value(json).unwrap();
        let draft = CommentDraft::editing(&comment);

        assert_eq!(draft.mode, DraftMode::Editing(10));
        assert_eq!(draft.food_comment, "rich broth");
        assert_eq!(draft.existing_photos.len(), 2);
        let request = draft.to_request().unwrap();
        assert_eq!(request.overall_score, 4.0);
        assert_eq!(request.restaurant_id, 7);
    }

    #[test]
    fn test_eighth_photo_is_rejected() {
        let tracker = PreviewTracker::new();
        let mut draft = CommentDraft::new(7);
        draft.existing_photos = vec!["/uploads/1.jpg".into(); 3];
        for i in 0..4 {
            draft
                .stage_photo(&tracker, &format!("{i}.png"), "image/png", vec![1])
                .unwrap();
        }
        assert_eq!(draft.photo_count(), 7);
        assert_eq!(
            draft
                .stage_photo(&tracker, "8.jpg", "image/jpeg", vec![1])
                .unwrap_err(),
            ValidationError::TooManyPhotos { max: 7 }
        );
        assert_eq!(tracker.live(), 4);

        draft.remove_existing(0).unwrap();
        draft
            .stage_photo(&tracker, "8.jpg", "image/jpg", vec![1])
            .unwrap();
        assert_eq!(draft.staged()[4].upload.mime, "image/jpeg");
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let tracker = PreviewTracker::new();
        let mut draft = CommentDraft::new(7);
        let err = draft
            .stage_photo(&tracker, "anim.gif", "image/gif", vec![1])
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedPhotoType { .. }));
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_removing_and_discarding_release_previews() {
        let tracker = PreviewTracker::new();
        let mut draft = CommentDraft::new(7);
        draft.stage_photo(&tracker, "a.jpg", "image/jpeg", vec![1]).unwrap();
        draft.stage_photo(&tracker, "b.jpg", "image/jpeg", vec![2]).unwrap();
        draft.remove_staged(0).unwrap();
        assert_eq!(tracker.live(), 1);
        assert_eq!(draft.remove_staged(5), Err(ValidationError::NoSuchPhoto(5)));
        drop(draft);
        assert_eq!(tracker.live(), 0);
    }

    proptest! {
        #[test]
        fn prop_overall_is_rounded_mean(food in 1u8..=5, environment in 1u8..=5, visiting in 1u8..=5) {
            let mut draft = CommentDraft::new(1);
            draft.set_scores(food, environment, visiting);
            let request = draft.to_request().unwrap();
            let mean = (food as f64 + environment as f64 + visiting as f64) / 3.0;
            prop_assert_eq!(request.overall_score, (mean * 10.0).round() / 10.0);
            prop_assert!((request.overall_score - mean).abs() <= 0.05 + f64::EPSILON);
            prop_assert!((1.0..=5.0).contains(&request.overall_score));
        }
    }
}
