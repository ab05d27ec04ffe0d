use std::path::Path;

use axum::Json;
use axum::extract::{Multipart, State};
use chrono::Utc;
use companyrating_core::AppError;
use tracing::info;
use uuid::Uuid;

use crate::dto::UploadVideoResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Upper bound for a single upload request body.
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;

const VIDEO_FIELD: &str = "video";
const VIDEO_TOKENS: [&str; 6] = ["mp4", "avi", "mov", "wmv", "flv", "mkv"];

/// POST /api/upload-video - Store one video file under the upload directory.
pub async fn upload_video_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadVideoResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::Validation(format!("invalid upload: {error}")))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let extension = video_extension(
            field.file_name().unwrap_or_default(),
            field.content_type().unwrap_or_default(),
        )?;
        let bytes = field
            .bytes()
            .await
            .map_err(|error| AppError::Validation(format!("invalid upload: {error}")))?;

        let file_name = stored_file_name(extension.as_str());
        let directory = state.uploads.directory();
        tokio::fs::create_dir_all(directory).await.map_err(|error| {
            AppError::Internal(format!("failed to prepare upload directory: {error}"))
        })?;
        tokio::fs::write(directory.join(&file_name), &bytes)
            .await
            .map_err(|error| AppError::Internal(format!("failed to store upload: {error}")))?;

        info!(file_name = %file_name, size = bytes.len(), "stored video upload");
        return Ok(Json(UploadVideoResponse {
            success: true,
            video_path: format!("/uploads/{file_name}"),
        }));
    }

    Err(AppError::Validation("No file uploaded".to_owned()).into())
}

/// Returns the dotted extension when both the file name and the content type name a video format.
fn video_extension(file_name: &str, content_type: &str) -> Result<String, AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .filter(|extension| extension.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_default();

    let names_video = |value: &str| {
        let value = value.to_ascii_lowercase();
        VIDEO_TOKENS.iter().any(|token| value.contains(token))
    };

    if extension.is_empty() || !names_video(extension) || !names_video(content_type) {
        return Err(AppError::Validation(
            "Only video files are allowed!".to_owned(),
        ));
    }

    Ok(format!(".{extension}"))
}

fn stored_file_name(extension: &str) -> String {
    let suffix = Uuid::new_v4().as_u128() % 1_000_000_000;
    format!("{}-{suffix}{extension}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{stored_file_name, video_extension};

    #[test]
    fn accepts_matching_extension_and_content_type() {
        assert_eq!(
            video_extension("clip.MP4", "video/mp4").ok(),
            Some(".MP4".to_owned())
        );
        assert_eq!(
            video_extension("clip.mkv", "video/x-matroska-mkv").ok(),
            Some(".mkv".to_owned())
        );
    }

    #[test]
    fn rejects_non_video_uploads() {
        assert!(video_extension("notes.txt", "video/mp4").is_err());
        assert!(video_extension("clip.mp4", "text/plain").is_err());
        assert!(video_extension("clip", "video/mp4").is_err());
    }

    #[test]
    fn stored_names_keep_the_extension() {
        let name = stored_file_name(".mov");
        let (millis, rest) = name.split_once('-').unwrap_or_default();

        assert!(millis.parse::<i64>().is_ok());
        assert!(rest.ends_with(".mov"));
        assert!(rest.trim_end_matches(".mov").parse::<u32>().is_ok());
    }
}
