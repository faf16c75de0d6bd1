//! # Comments and Photos Commands
//!
//! ```bash
//! ramendir comments 42 --page 2
//! ramendir comments 42 --all
//! ramendir photos 42                 # preview with "+N more"
//! ramendir photos 42 --view 3 --step -1
//! ```

use anyhow::Result;
use colored::Colorize;

use crate::api::Comment;
use crate::commands::CommandContext;
use crate::error::ValidationError;
use crate::errors::{display_validation_error, report};
use crate::exit_codes::*;
use crate::query::{to_api_page, to_ui_page};

#[derive(Debug)]
pub struct CommentsArgs {
    pub restaurant_id: u64,
    pub page: u32,
    pub all: bool,
}

#[derive(Debug)]
pub struct PhotosArgs {
    pub restaurant_id: u64,
    pub all: bool,
    /// 1-indexed photo to open in the viewer.
    pub view: Option<usize>,
    /// Viewer steps to take after opening; wraps at both ends.
    pub step: i64,
}

fn score(value: Option<u8>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub(crate) fn print_comment(comment: &Comment, own: bool) {
    let overall = comment
        .overall_score
        .or(comment.average_score)
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "-".to_string());
    let author = if own {
        format!("{} (you)", comment.username)
    } else {
        comment.username.clone()
    };
    println!(
        "{} {}  {}  {}",
        format!("#{}", comment.id).dimmed(),
        author.bold(),
        overall.yellow(),
        comment.created_at.as_deref().unwrap_or("").dimmed()
    );
    let sections = [
        ("Food", &comment.food_comment, comment.food_score),
        ("Environment", &comment.environment_comment, comment.environment_score),
        ("Visit", &comment.visiting_comment, comment.visiting_score),
    ];
    for (label, text, value) in sections {
        println!(
            "  {:<12} {}  {}",
            label.dimmed(),
            score(value),
            text.as_deref().unwrap_or("")
        );
    }
    for photo in &comment.photos {
        println!("  {} {}", "▣".cyan(), photo);
    }
}

pub async fn execute_comments(args: CommentsArgs) -> Result<i32> {
    let ctx = CommandContext::open_restored().await?;

    if args.all {
        let comments = match ctx.api.comments_for_restaurant(args.restaurant_id).await {
            Ok(comments) => comments,
            Err(e) => return Ok(report(&e.into())),
        };
        for comment in &comments {
            print_comment(comment, ctx.session.owns(comment));
            println!();
        }
        println!("{}", format!("{} comments", comments.len()).dimmed());
        return Ok(EXIT_SUCCESS);
    }

    let Some(page) = to_api_page(args.page) else {
        display_validation_error(&ValidationError::PageOutOfRange.to_string());
        return Ok(EXIT_INVALID_INPUT);
    };
    let mut gallery = ctx.gallery(args.restaurant_id);
    if let Err(e) = gallery.go_to_page(&ctx.api, page).await {
        return Ok(report(&e));
    }
    let Some(comments) = gallery.comments() else {
        return Ok(EXIT_SUCCESS);
    };
    if comments.content.is_empty() {
        println!("{}", "No comments yet.".dimmed());
    }
    for comment in &comments.content {
        print_comment(comment, ctx.session.owns(comment));
        println!();
    }
    println!(
        "{}",
        format!(
            "Page {} of {} ({} comments)",
            to_ui_page(gallery.page()),
            comments.total_pages.max(1),
            comments.total_elements
        )
        .dimmed()
    );
    Ok(EXIT_SUCCESS)
}

pub async fn execute_photos(args: PhotosArgs) -> Result<i32> {
    let ctx = CommandContext::open()?;
    let mut gallery = ctx.gallery(args.restaurant_id);
    if let Err(e) = gallery.refresh_photos(&ctx.api).await {
        return Ok(report(&e));
    }
    if gallery.photos().is_empty() {
        println!("{}", "No photos yet.".dimmed());
        return Ok(EXIT_SUCCESS);
    }

    if let Some(view) = args.view {
        let opened = view
            .checked_sub(1)
            .and_then(|index| gallery.open_viewer(index))
            .is_some();
        if !opened {
            display_validation_error(&ValidationError::NoSuchPhoto(view).to_string());
            return Ok(EXIT_INVALID_INPUT);
        }
        for _ in 0..args.step.unsigned_abs() {
            if args.step > 0 {
                gallery.next();
            } else {
                gallery.previous();
            }
        }
        if let (Some(index), Some(photo)) = (gallery.viewer_index(), gallery.current()) {
            println!(
                "{} {}  {}",
                format!("[{}/{}]", index + 1, gallery.photos().len()).dimmed(),
                photo.url,
                photo.username.dimmed()
            );
        }
        return Ok(EXIT_SUCCESS);
    }

    let shown = if args.all {
        gallery.photos()
    } else {
        gallery.preview()
    };
    for (i, photo) in shown.iter().enumerate() {
        println!(
            "{:>3}. {}  {}",
            i + 1,
            photo.url,
            photo.username.dimmed()
        );
    }
    if !args.all {
        if let Some(label) = gallery.overflow_label() {
            println!("     {}", label.cyan());
        }
    }
    Ok(EXIT_SUCCESS)
}
