//! # Comment Submission Workflow
//!
//! Drives one comment draft through
//! `Closed -> Open (new or editing) -> Submitting -> Closed | Open`.
//!
//! ## Strategies
//!
//! - no staged photos: `POST /comments` or `PUT /comments/{id}`
//! - new comment with photos: one `POST /comments-multipart`
//! - edit with photos: `PUT /comments/{id}`, then `POST /photos/comment/{id}`
//!
//! When the text is saved but photos are not, the draft stays open in
//! editing mode holding only the photos still to upload. Submitting again
//! repeats the text update only if the text changed since it was saved.
//!
//! Every mutation that reaches the server is followed by a refresh of the
//! comment page and the gallery; local lists are never patched.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::api::{Comment, CommentEligibility, CommentRequest, RamenApi, ReportCommentRequest};
use crate::config::TokenStore;
use crate::error::{RamenError, Result, ValidationError};
use crate::gallery::Gallery;
use crate::session::SessionManager;
use crate::submission::draft::{CommentDraft, DraftMode};
use crate::submission::photos::{MAX_PHOTOS, PreviewTracker, retain_failed};

pub const REPORT_REASON_MIN: usize = 5;
pub const REPORT_REASON_MAX: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Closed,
    Open,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Text and photos are saved; the draft is closed.
    Saved { comment_id: u64 },
    /// The text is saved but some photos are not; the draft is still open.
    PhotosFailed { comment_id: u64, message: String },
}

enum Sent {
    Done(u64),
    PhotosFailed { comment_id: u64, message: String },
}

fn describe_failures(errors: &BTreeMap<String, String>) -> String {
    let messages: Vec<&str> = errors.values().map(String::as_str).collect();
    format!("Some photos couldn't be uploaded: {}", messages.join(", "))
}

#[derive(Debug)]
pub struct SubmissionWorkflow {
    draft: Option<CommentDraft>,
    submitting: bool,
    tracker: PreviewTracker,
    /// Text last persisted for the comment being edited.
    saved_request: Option<CommentRequest>,
    error: Option<String>,
    photo_error: Option<String>,
    pending_delete: Option<u64>,
}

impl Default for SubmissionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self::with_tracker(PreviewTracker::new())
    }

    pub fn with_tracker(tracker: PreviewTracker) -> Self {
        Self {
            draft: None,
            submitting: false,
            tracker,
            saved_request: None,
            error: None,
            photo_error: None,
            pending_delete: None,
        }
    }

    pub fn state(&self) -> DraftState {
        if self.submitting {
            DraftState::Submitting
        } else if self.draft.is_some() {
            DraftState::Open
        } else {
            DraftState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == DraftState::Open
    }

    pub fn draft(&self) -> Option<&CommentDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut CommentDraft> {
        self.draft.as_mut()
    }

    pub fn tracker(&self) -> &PreviewTracker {
        &self.tracker
    }

    /// Last submission error, other than photo failures.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn photo_error(&self) -> Option<&str> {
        self.photo_error.as_deref()
    }

    pub fn pending_delete(&self) -> Option<u64> {
        self.pending_delete
    }

    /// Drop the draft, releasing its previews, and forget its errors.
    fn reset(&mut self) {
        self.draft = None;
        self.saved_request = None;
        self.error = None;
        self.photo_error = None;
    }

    /// Open an empty draft, discarding any current one.
    pub fn open_new(&mut self, restaurant_id: u64) -> &mut CommentDraft {
        self.reset();
        self.draft.insert(CommentDraft::new(restaurant_id))
    }

    /// Open a draft pre-filled from `comment`, discarding any current one.
    pub fn open_edit(&mut self, comment: &Comment) -> &mut CommentDraft {
        self.reset();
        self.draft.insert(CommentDraft::editing(comment))
    }

    /// Load a comment by id and open it for editing.
    pub async fn open_edit_by_id<A: RamenApi + ?Sized>(
        &mut self,
        api: &A,
        comment_id: u64,
    ) -> Result<&mut CommentDraft> {
        let comment = api.comment(comment_id).await?;
        Ok(self.open_edit(&comment))
    }

    /// Discard the draft and release its previews.
    pub fn close(&mut self) {
        self.reset();
    }

    /// Stage a photo on the open draft. Checked locally, no request is made.
    pub fn stage_photo(&mut self, file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<()> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(ValidationError::DraftClosed.into());
        };
        match draft.stage_photo(&self.tracker, file_name, mime, bytes) {
            Ok(photo) => {
                debug!("staged {} as {}", photo.file_name(), photo.preview.id());
                self.photo_error = None;
                Ok(())
            }
            Err(e) => {
                self.photo_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn remove_staged(&mut self, index: usize) -> Result<()> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(ValidationError::DraftClosed.into());
        };
        draft.remove_staged(index)?;
        if draft.photo_count() < MAX_PHOTOS {
            self.photo_error = None;
        }
        Ok(())
    }

    pub fn remove_existing(&mut self, index: usize) -> Result<String> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(ValidationError::DraftClosed.into());
        };
        let url = draft.remove_existing(index)?;
        if draft.photo_count() < MAX_PHOTOS {
            self.photo_error = None;
        }
        Ok(url)
    }

    /// Submit the open draft.
    ///
    /// Validation and the sign-in check happen before any request. On
    /// `Err` the draft is back in `Open` with [`Self::error`] set.
    pub async fn submit<A, S>(
        &mut self,
        api: &A,
        session: &mut SessionManager<S>,
        gallery: &mut Gallery,
    ) -> Result<SubmitOutcome>
    where
        A: RamenApi + ?Sized,
        S: TokenStore,
    {
        if self.submitting {
            return Err(ValidationError::SubmissionInProgress.into());
        }
        let Some(mut draft) = self.draft.take() else {
            return Err(ValidationError::DraftClosed.into());
        };
        self.submitting = true;

        let prepared = draft
            .to_request()
            .map_err(RamenError::from)
            .and_then(|request| session.require_token().map(|token| (request, token)));
        let (request, token) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return Err(self.reopen(draft, e)),
        };
        self.error = None;

        let sent = self.send(api, session, &mut draft, &request, &token).await;
        self.submitting = false;
        match sent {
            Ok(Sent::Done(comment_id)) => {
                info!("comment {} saved", comment_id);
                self.reset();
                drop(draft);
                refresh_after_mutation(api, gallery).await;
                Ok(SubmitOutcome::Saved { comment_id })
            }
            Ok(Sent::PhotosFailed {
                comment_id,
                message,
            }) => {
                warn!("comment {} saved without some photos: {}", comment_id, message);
                draft.mode = DraftMode::Editing(comment_id);
                self.saved_request = Some(request);
                self.photo_error = Some(message.clone());
                self.draft = Some(draft);
                refresh_after_mutation(api, gallery).await;
                Ok(SubmitOutcome::PhotosFailed {
                    comment_id,
                    message,
                })
            }
            Err(e) => Err(self.reopen(draft, e)),
        }
    }

    fn reopen(&mut self, draft: CommentDraft, e: RamenError) -> RamenError {
        self.submitting = false;
        self.error = Some(e.to_string());
        self.draft = Some(draft);
        e
    }

    async fn send<A, S>(
        &mut self,
        api: &A,
        session: &mut SessionManager<S>,
        draft: &mut CommentDraft,
        request: &CommentRequest,
        token: &str,
    ) -> Result<Sent>
    where
        A: RamenApi + ?Sized,
        S: TokenStore,
    {
        let uploads = draft.uploads();
        match draft.mode {
            DraftMode::New if uploads.is_empty() => {
                let comment = session.observe(api.create_comment(token, request).await)?;
                Ok(Sent::Done(comment.id))
            }
            DraftMode::Editing(comment_id) if uploads.is_empty() => {
                session.observe(api.update_comment(token, comment_id, request).await)?;
                Ok(Sent::Done(comment_id))
            }
            DraftMode::New => {
                debug!("creating comment with {} photos", uploads.len());
                let response = session.observe(
                    api.create_comment_with_photos(token, request, &uploads)
                        .await,
                )?;
                let comment_id = response.comment.id;
                if response.photo_errors.is_empty() {
                    return Ok(Sent::Done(comment_id));
                }
                draft.existing_photos = response.comment.photos.clone();
                retain_failed(draft.staged_mut(), response.photo_errors.keys());
                Ok(Sent::PhotosFailed {
                    comment_id,
                    message: describe_failures(&response.photo_errors),
                })
            }
            DraftMode::Editing(comment_id) => {
                if self.saved_request.as_ref() == Some(request) {
                    debug!("text of comment {} unchanged, retrying upload only", comment_id);
                } else {
                    session.observe(api.update_comment(token, comment_id, request).await)?;
                    self.saved_request = Some(request.clone());
                }
                match api.upload_comment_photos(token, comment_id, &uploads).await {
                    Ok(response) => {
                        draft
                            .existing_photos
                            .extend(response.uploaded_photos.iter().cloned());
                        match response.failures() {
                            None => Ok(Sent::Done(comment_id)),
                            Some(errors) => {
                                retain_failed(draft.staged_mut(), errors.keys());
                                Ok(Sent::PhotosFailed {
                                    comment_id,
                                    message: describe_failures(errors),
                                })
                            }
                        }
                    }
                    Err(e) if e.is_auth_error() => Err(session.handle_error(e)),
                    Err(e) => Ok(Sent::PhotosFailed {
                        comment_id,
                        message: format!("Failed to upload photos: {}", e),
                    }),
                }
            }
        }
    }

    /// Open the delete confirmation for `comment_id`.
    pub fn request_delete(&mut self, comment_id: u64) {
        self.pending_delete = Some(comment_id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the comment awaiting confirmation, then re-fetch the comment
    /// page and gallery whatever the outcome.
    pub async fn confirm_delete<A, S>(
        &mut self,
        api: &A,
        session: &mut SessionManager<S>,
        gallery: &mut Gallery,
    ) -> Result<u64>
    where
        A: RamenApi + ?Sized,
        S: TokenStore,
    {
        let comment_id = self
            .pending_delete
            .ok_or(ValidationError::NoDeletePending)?;
        let token = session.require_token()?;
        self.pending_delete = None;

        let result = api.delete_comment(&token, comment_id).await;
        let result = session.observe(result);
        refresh_after_mutation(api, gallery).await;
        result?;
        info!("comment {} deleted", comment_id);
        Ok(comment_id)
    }

    /// Whether the signed-in user may comment on the restaurant now.
    pub async fn can_comment<A, S>(
        &self,
        api: &A,
        session: &mut SessionManager<S>,
        restaurant_id: u64,
    ) -> Result<CommentEligibility>
    where
        A: RamenApi + ?Sized,
        S: TokenStore,
    {
        let token = session.require_token()?;
        session.observe(api.can_comment(&token, restaurant_id).await)
    }

    /// Report a comment. The reason is checked locally first.
    pub async fn report<A, S>(
        &self,
        api: &A,
        session: &mut SessionManager<S>,
        comment_id: u64,
        reason: &str,
    ) -> Result<()>
    where
        A: RamenApi + ?Sized,
        S: TokenStore,
    {
        let reason = reason.trim();
        let length = reason.chars().count();
        if !(REPORT_REASON_MIN..=REPORT_REASON_MAX).contains(&length) {
            return Err(ValidationError::ReasonLength {
                min: REPORT_REASON_MIN,
                max: REPORT_REASON_MAX,
            }
            .into());
        }
        let token = session.require_token()?;
        let report = ReportCommentRequest {
            comment_id,
            reason: reason.to_string(),
        };
        session.observe(api.report_comment(&token, &report).await)
    }
}

async fn refresh_after_mutation<A: RamenApi + ?Sized>(api: &A, gallery: &mut Gallery) {
    if let Err(e) = gallery.refresh(api).await {
        warn!(
            "refresh of restaurant {} after mutation failed: {}",
            gallery.restaurant_id(),
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::fake::{FakeApi, comment_json, comment_page_json, photos_json, user_json};
    use crate::config::MemoryTokenStore;
    use serde_json::json;

    async fn signed_in(api: &FakeApi) -> SessionManager<MemoryTokenStore> {
        api.on("current_user", user_json(1, "alice"))
            .on("comments_page", comment_page_json(vec![], 0))
            .on("restaurant_photos", photos_json(&[]));
        let mut session = SessionManager::new(MemoryTokenStore::with_token("tok"));
        session.restore_session(api).await.unwrap();
        session
    }

    fn scored_draft(workflow: &mut SubmissionWorkflow, restaurant_id: u64) {
        let draft = workflow.open_new(restaurant_id);
        draft.food_comment = "rich broth".into();
        draft.set_scores(4, 5, 3);
    }

    #[tokio::test]
    async fn test_text_only_comment_creates_and_refreshes() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        api.on("create_comment", comment_json(10, 1, 7));
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        scored_draft(&mut workflow, 7);

        let outcome = workflow.submit(&api, &mut session, &mut gallery).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Saved { comment_id: 10 });
        assert_eq!(workflow.state(), DraftState::Closed);
        assert_eq!(
            api.last_call("create_comment").as_deref(),
            Some("create_comment tok overall=4")
        );
        assert_eq!(api.count("comments_page"), 1);
        assert_eq!(api.count("restaurant_photos"), 1);
    }

    #[tokio::test]
    async fn test_new_comment_with_photos_uses_one_multipart_request() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        let mut saved = comment_json(10, 1, 7);
        saved["photos"] = json!(["/uploads/a.jpg", "/uploads/b.png"]);
        api.on("create_comment_with_photos", json!({ "comment": saved }));
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        scored_draft(&mut workflow, 7);
        workflow.stage_photo("a.jpg", "image/jpeg", vec![1]).unwrap();
        workflow.stage_photo("b.png", "image/png", vec![2]).unwrap();
        assert_eq!(workflow.tracker().live(), 2);

        let outcome = workflow.submit(&api, &mut session, &mut gallery).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Saved { comment_id: 10 });
        assert_eq!(
            api.last_call("create_comment_with_photos").as_deref(),
            Some("create_comment_with_photos tok overall=4 photos=a.jpg,b.png")
        );
        assert_eq!(api.count("create_comment"), 0);
        assert_eq!(api.count("comments_page"), 1);
        assert_eq!(api.count("restaurant_photos"), 1);
        assert_eq!(workflow.tracker().live(), 0);
    }

    #[tokio::test]
    async fn test_partial_multipart_keeps_failed_photo_for_retry() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        let mut saved = comment_json(10, 1, 7);
        saved["photos"] = json!(["/uploads/a.jpg"]);
        api.on(
            "create_comment_with_photos",
            json!({ "comment": saved, "photoErrors": { "file_1": "too large" } }),
        );
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        scored_draft(&mut workflow, 7);
        workflow.stage_photo("a.jpg", "image/jpeg", vec![1]).unwrap();
        workflow.stage_photo("b.jpg", "image/jpeg", vec![2]).unwrap();

        let outcome = workflow.submit(&api, &mut session, &mut gallery).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::PhotosFailed {
                comment_id: 10,
                message: "Some photos couldn't be uploaded: too large".into()
            }
        );
        let draft = workflow.draft().unwrap();
        assert_eq!(draft.mode, DraftMode::Editing(10));
        assert_eq!(draft.existing_photos, vec!["/uploads/a.jpg".to_string()]);
        assert_eq!(draft.staged().len(), 1);
        assert_eq!(draft.staged()[0].file_name(), "b.jpg");
        assert_eq!(workflow.tracker().live(), 1);
        assert_eq!(api.count("comments_page"), 1);
    }

    #[tokio::test]
    async fn test_failed_upload_retry_skips_text_update() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        api.on("update_comment", comment_json(10, 1, 7))
            .push(
                "upload_comment_photos",
                Err(ApiError::Server {
                    status: 500,
                    message: "storage offline".into(),
                }),
            )
            .on(
                "upload_comment_photos",
                json!({ "uploadedPhotos": ["/uploads/c.jpg"] }),
            );
        let comment: Comment = serde_json::from_value(comment_json(10, 1, 7)).unwrap();
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        workflow.open_edit(&comment);
        workflow.stage_photo("c.jpg", "image/jpeg", vec![3]).unwrap();

        let outcome = workflow.submit(&api, &mut session, &mut gallery).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::PhotosFailed { comment_id: 10, .. }));
        assert!(workflow.is_open());
        assert!(
            workflow
                .photo_error()
                .is_some_and(|m| m.starts_with("Failed to upload photos"))
        );
        assert_eq!(api.count("update_comment"), 1);

        let outcome = workflow.submit(&api, &mut session, &mut gallery).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Saved { comment_id: 10 });
        assert_eq!(api.count("update_comment"), 1);
        assert_eq!(api.count("upload_comment_photos"), 2);
        assert_eq!(workflow.state(), DraftState::Closed);
    }

    #[tokio::test]
    async fn test_changed_text_is_saved_again_on_retry() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        api.on("update_comment", comment_json(10, 1, 7))
            .push(
                "upload_comment_photos",
                Err(ApiError::Network {
                    message: "reset".into(),
                }),
            )
            .on("upload_comment_photos", json!({ "uploadedPhotos": ["/c.jpg"] }));
        let comment: Comment = serde_json::from_value(comment_json(10, 1, 7)).unwrap();
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        workflow.open_edit(&comment);
        workflow.stage_photo("c.jpg", "image/jpeg", vec![3]).unwrap();
        workflow.submit(&api, &mut session, &mut gallery).await.unwrap();

        workflow.draft_mut().unwrap().food_comment = "even richer".into();
        workflow.submit(&api, &mut session, &mut gallery).await.unwrap();
        assert_eq!(api.count("update_comment"), 2);
        assert_eq!(
            api.last_call("update_comment").as_deref(),
            Some("update_comment tok 10 food=even richer")
        );
    }

    #[tokio::test]
    async fn test_invalid_draft_makes_no_request() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        let calls_before = api.calls().len();
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        workflow.open_new(7).food_score = Some(4);

        let err = workflow
            .submit(&api, &mut session, &mut gallery)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(workflow.is_open());
        assert!(workflow.error().is_some());
        assert_eq!(api.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_signed_out_submit_is_auth_error() {
        let api = FakeApi::new();
        let mut session = SessionManager::new(MemoryTokenStore::new());
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        scored_draft(&mut workflow, 7);

        let err = workflow
            .submit(&api, &mut session, &mut gallery)
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert!(api.calls().is_empty());
        assert!(workflow.is_open());
    }

    #[tokio::test]
    async fn test_expired_token_on_submit_signs_out() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        api.push(
            "create_comment",
            Err(ApiError::Unauthorized {
                message: "expired".into(),
            }),
        );
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        scored_draft(&mut workflow, 7);

        let err = workflow
            .submit(&api, &mut session, &mut gallery)
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert!(!session.is_authenticated());
        assert!(workflow.is_open());
    }

    #[tokio::test]
    async fn test_closed_workflow_rejects_actions() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();
        assert!(workflow.stage_photo("a.jpg", "image/jpeg", vec![1]).is_err());
        let err = workflow
            .submit(&api, &mut session, &mut gallery)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RamenError::Validation(ValidationError::DraftClosed)
        ));
    }

    #[tokio::test]
    async fn test_staging_errors_surface_as_photo_error() {
        let mut workflow = SubmissionWorkflow::new();
        workflow.open_new(7);
        assert!(workflow.stage_photo("a.gif", "image/gif", vec![1]).is_err());
        assert!(workflow.photo_error().is_some());
        workflow.stage_photo("a.png", "image/png", vec![1]).unwrap();
        assert!(workflow.photo_error().is_none());

        workflow.close();
        assert_eq!(workflow.tracker().live(), 0);
    }

    #[tokio::test]
    async fn test_open_edit_by_id_prefills_draft() {
        let api = FakeApi::new();
        api.on("comment", comment_json(10, 1, 7));
        let mut workflow = SubmissionWorkflow::new();
        let draft = workflow.open_edit_by_id(&api, 10).await.unwrap();
        assert_eq!(draft.mode, DraftMode::Editing(10));
        assert_eq!(draft.food_score, Some(4));
    }

    #[tokio::test]
    async fn test_delete_refreshes_even_on_failure() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        let mut gallery = Gallery::new(7);
        let mut workflow = SubmissionWorkflow::new();

        assert!(
            workflow
                .confirm_delete(&api, &mut session, &mut gallery)
                .await
                .is_err()
        );
        assert_eq!(api.count("delete_comment"), 0);

        workflow.request_delete(10);
        assert_eq!(
            workflow
                .confirm_delete(&api, &mut session, &mut gallery)
                .await
                .unwrap(),
            10
        );
        assert_eq!(
            api.last_call("delete_comment").as_deref(),
            Some("delete_comment tok 10")
        );
        assert_eq!(workflow.pending_delete(), None);

        api.push(
            "delete_comment",
            Err(ApiError::Forbidden {
                message: "not yours".into(),
            }),
        );
        workflow.request_delete(11);
        assert!(
            workflow
                .confirm_delete(&api, &mut session, &mut gallery)
                .await
                .is_err()
        );
        assert_eq!(api.count("comments_page"), 2);
        assert_eq!(api.count("restaurant_photos"), 2);
    }

    #[tokio::test]
    async fn test_cancel_delete_sends_nothing() {
        let mut workflow = SubmissionWorkflow::new();
        workflow.request_delete(10);
        workflow.cancel_delete();
        assert_eq!(workflow.pending_delete(), None);
    }

    #[tokio::test]
    async fn test_report_reason_length() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        let workflow = SubmissionWorkflow::new();

        let err = workflow
            .report(&api, &mut session, 10, "  bad ")
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(api.count("report_comment"), 0);

        workflow
            .report(&api, &mut session, 10, "  spam link  ")
            .await
            .unwrap();
        assert_eq!(
            api.last_call("report_comment").as_deref(),
            Some("report_comment tok 10 spam link")
        );
    }

    #[tokio::test]
    async fn test_can_comment_uses_token() {
        let api = FakeApi::new();
        let mut session = signed_in(&api).await;
        api.on(
            "can_comment",
            json!({ "canComment": false, "message": "wait", "hoursRemaining": 3 }),
        );
        let workflow = SubmissionWorkflow::new();
        let answer = workflow.can_comment(&api, &mut session, 7).await.unwrap();
        assert!(!answer.can_comment);
        assert_eq!(answer.hours_remaining, Some(3));
        assert_eq!(api.last_call("can_comment").as_deref(), Some("can_comment tok 7"));
    }
}
