//! # Comment Commands
//!
//! Write, edit, delete and report comments.
//!
//! ## Usage
//!
//! ```bash
//! ramendir comment add 42 --food-score 4 --environment-score 5 --visiting-score 3 \
//!     --food "rich broth" --photo bowl.jpg --photo counter.png
//! ramendir comment edit 1001 --food "even richer" --remove-photo 2 --photo queue.jpg
//! ramendir comment delete 1001
//! ramendir comment report 1002 "spam link in the visit section"
//! ```
//!
//! When the text is saved but some photos are not, the command exits with
//! `EXIT_PARTIAL_SUCCESS`; rerunning `comment edit` with the same photos
//! retries them.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::api::Comment;
use crate::commands::CommandContext;
use crate::commands::comments::print_comment;
use crate::error::{RamenError, ValidationError};
use crate::errors::{display_success, display_warning, report};
use crate::exit_codes::*;
use crate::submission::{CommentDraft, SubmissionWorkflow, SubmitOutcome, mime_from_path};

/// Form fields; `None` leaves the draft's value as it is.
#[derive(Debug, Default)]
pub struct CommentForm {
    pub food: Option<String>,
    pub environment: Option<String>,
    pub visiting: Option<String>,
    pub food_score: Option<u8>,
    pub environment_score: Option<u8>,
    pub visiting_score: Option<u8>,
    pub photos: Vec<PathBuf>,
}

impl CommentForm {
    fn fill(&self, draft: &mut CommentDraft) {
        if let Some(text) = &self.food {
            draft.food_comment = text.clone();
        }
        if let Some(text) = &self.environment {
            draft.environment_comment = text.clone();
        }
        if let Some(text) = &self.visiting {
            draft.visiting_comment = text.clone();
        }
        if self.food_score.is_some() {
            draft.food_score = self.food_score;
        }
        if self.environment_score.is_some() {
            draft.environment_score = self.environment_score;
        }
        if self.visiting_score.is_some() {
            draft.visiting_score = self.visiting_score;
        }
    }
}

#[derive(Debug)]
pub enum CommentArgs {
    Add {
        restaurant_id: u64,
        form: CommentForm,
    },
    Edit {
        comment_id: u64,
        form: CommentForm,
        /// 1-indexed positions of existing photos to drop.
        remove_photos: Vec<usize>,
    },
    Delete {
        comment_id: u64,
        yes: bool,
    },
    Report {
        comment_id: u64,
        reason: String,
    },
}

pub async fn execute(args: CommentArgs) -> Result<i32> {
    let mut ctx = CommandContext::open_restored().await?;
    match args {
        CommentArgs::Add {
            restaurant_id,
            form,
        } => add(&mut ctx, restaurant_id, form).await,
        CommentArgs::Edit {
            comment_id,
            form,
            remove_photos,
        } => edit(&mut ctx, comment_id, form, remove_photos).await,
        CommentArgs::Delete { comment_id, yes } => delete(&mut ctx, comment_id, yes).await,
        CommentArgs::Report { comment_id, reason } => {
            let workflow = SubmissionWorkflow::new();
            match workflow
                .report(&ctx.api, &mut ctx.session, comment_id, &reason)
                .await
            {
                Ok(()) => {
                    display_success(&format!("Comment #{} reported", comment_id));
                    Ok(EXIT_SUCCESS)
                }
                Err(e) => Ok(report(&e)),
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string())
}

/// Read and stage every photo of the form. Stops at the first rejected one.
fn stage_photos(workflow: &mut SubmissionWorkflow, photos: &[PathBuf]) -> Result<Option<i32>> {
    for path in photos {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read photo: {}", path.display()))?;
        let mime = mime_from_path(path);
        if let Err(e) = workflow.stage_photo(&file_name(path), &mime, bytes) {
            display_warning(&format!("{}: {}", path.display(), e));
            return Ok(Some(report(&e)));
        }
    }
    Ok(None)
}

async fn submit(
    ctx: &mut CommandContext,
    workflow: &mut SubmissionWorkflow,
    restaurant_id: u64,
) -> Result<i32> {
    let mut gallery = ctx.gallery(restaurant_id);
    match workflow.submit(&ctx.api, &mut ctx.session, &mut gallery).await {
        Ok(SubmitOutcome::Saved { comment_id }) => {
            display_success(&format!("Comment #{} saved", comment_id));
            if let Some(page) = gallery.comments() {
                println!(
                    "  {} {} comments, {} photos",
                    "→".cyan(),
                    page.total_elements,
                    gallery.photos().len()
                );
            }
            Ok(EXIT_SUCCESS)
        }
        Ok(SubmitOutcome::PhotosFailed {
            comment_id,
            message,
        }) => {
            display_warning(&format!("Comment #{} saved. {}", comment_id, message));
            if let Some(draft) = workflow.draft() {
                let pending: Vec<&str> = draft.staged().iter().map(|p| p.file_name()).collect();
                println!(
                    "  {} Retry with `ramendir comment edit {}` and these photos: {}",
                    "→".cyan(),
                    comment_id,
                    pending.join(", ")
                );
            }
            Ok(EXIT_PARTIAL_SUCCESS)
        }
        Err(e) => Ok(report(&e)),
    }
}

async fn add(ctx: &mut CommandContext, restaurant_id: u64, form: CommentForm) -> Result<i32> {
    let mut workflow = SubmissionWorkflow::new();
    form.fill(workflow.open_new(restaurant_id));
    if let Some(code) = stage_photos(&mut workflow, &form.photos)? {
        return Ok(code);
    }
    submit(ctx, &mut workflow, restaurant_id).await
}

/// Load a comment and check the signed-in user wrote it.
async fn load_own_comment(ctx: &CommandContext, comment_id: u64) -> Result<Comment, RamenError> {
    ctx.session.require_token()?;
    let comment = ctx.api.comment(comment_id).await?;
    if !ctx.session.owns(&comment) {
        return Err(RamenError::Auth(format!(
            "comment #{} belongs to {}",
            comment_id, comment.username
        )));
    }
    Ok(comment)
}

async fn edit(
    ctx: &mut CommandContext,
    comment_id: u64,
    form: CommentForm,
    mut remove_photos: Vec<usize>,
) -> Result<i32> {
    let comment = match load_own_comment(ctx, comment_id).await {
        Ok(comment) => comment,
        Err(e) => return Ok(report(&e)),
    };

    let mut workflow = SubmissionWorkflow::new();
    form.fill(workflow.open_edit(&comment));

    remove_photos.sort_unstable();
    remove_photos.dedup();
    for position in remove_photos.into_iter().rev() {
        let removed = position
            .checked_sub(1)
            .ok_or(RamenError::from(ValidationError::NoSuchPhoto(position)))
            .and_then(|index| workflow.remove_existing(index));
        match removed {
            Ok(url) => println!("  {} removing {}", "−".red(), url),
            Err(e) => return Ok(report(&e)),
        }
    }

    if let Some(code) = stage_photos(&mut workflow, &form.photos)? {
        return Ok(code);
    }
    submit(ctx, &mut workflow, comment.restaurant_id).await
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read answer")?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

async fn delete(ctx: &mut CommandContext, comment_id: u64, yes: bool) -> Result<i32> {
    let comment = match load_own_comment(ctx, comment_id).await {
        Ok(comment) => comment,
        Err(e) => return Ok(report(&e)),
    };

    let mut workflow = SubmissionWorkflow::new();
    workflow.request_delete(comment_id);
    print_comment(&comment, true);
    if !yes && !confirm("Delete this comment?")? {
        workflow.cancel_delete();
        println!("Cancelled.");
        return Ok(EXIT_SUCCESS);
    }

    let mut gallery = ctx.gallery(comment.restaurant_id);
    match workflow
        .confirm_delete(&ctx.api, &mut ctx.session, &mut gallery)
        .await
    {
        Ok(_) => {
            display_success(&format!("Comment #{} deleted", comment_id));
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(report(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_only_overrides_given_fields() {
        let mut draft = CommentDraft::new(7);
        draft.food_comment = "kept".into();
        draft.set_scores(2, 2, 2);
        let form = CommentForm {
            environment: Some("loud".into()),
            visiting_score: Some(5),
            ..CommentForm::default()
        };
        form.fill(&mut draft);
        assert_eq!(draft.food_comment, "kept");
        assert_eq!(draft.environment_comment, "loud");
        assert_eq!(draft.food_score, Some(2));
        assert_eq!(draft.visiting_score, Some(5));
    }

    #[test]
    fn test_file_name_of_path() {
        assert_eq!(file_name(Path::new("/tmp/bowl.jpg")), "bowl.jpg");
        assert_eq!(file_name(Path::new("/")), "photo");
    }
}
