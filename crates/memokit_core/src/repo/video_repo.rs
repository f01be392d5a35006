//! Video source contract and SQLite catalog implementation.
//!
//! # Responsibility
//! - Provide the `list_videos` / `get_video_info` request contract.
//! - Serve that contract from the `videos` table.
//!
//! # Invariants
//! - `list_videos` orders by `id` ascending so repeated reads are stable.
//! - Absent ids are `Ok(None)`, not errors.

use crate::db::DbError;
use crate::model::video::{Video, VideoId, VideoValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const VIDEO_SELECT_SQL: &str = "SELECT id, title, channel, duration_secs FROM videos";

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure raised by a video source.
///
/// Caching wrappers pass these through unchanged.
#[derive(Debug)]
pub enum SourceError {
    Validation(VideoValidationError),
    Db(DbError),
    InvalidData(String),
    /// Remote or simulated source is temporarily unreachable.
    Unavailable(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted video data: {message}"),
            Self::Unavailable(message) => write!(f, "video source unavailable: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<VideoValidationError> for SourceError {
    fn from(value: VideoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for SourceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SourceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Request contract of a (possibly slow) video data source.
pub trait VideoSource {
    fn list_videos(&self) -> SourceResult<Vec<Video>>;
    fn get_video_info(&self, id: &VideoId) -> SourceResult<Option<Video>>;
}

impl<S: VideoSource + ?Sized> VideoSource for &S {
    fn list_videos(&self) -> SourceResult<Vec<Video>> {
        (**self).list_videos()
    }

    fn get_video_info(&self, id: &VideoId) -> SourceResult<Option<Video>> {
        (**self).get_video_info(id)
    }
}

/// SQLite-backed video catalog.
pub struct SqliteVideoSource<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVideoSource<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts or replaces one catalog row.
    pub fn upsert_video(&self, video: &Video) -> SourceResult<()> {
        video.validate()?;

        self.conn.execute(
            "INSERT INTO videos (id, title, channel, duration_secs)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                channel = excluded.channel,
                duration_secs = excluded.duration_secs,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                video.id.as_str(),
                video.title.as_str(),
                video.channel.as_str(),
                i64::from(video.duration_secs),
            ],
        )?;
        Ok(())
    }

    /// Deletes one row; returns whether a row existed.
    pub fn delete_video(&self, id: &VideoId) -> SourceResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM videos WHERE id = ?1;", [id.as_str()])?;
        Ok(changed > 0)
    }

    pub fn count(&self) -> SourceResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM videos;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| SourceError::InvalidData(format!("negative row count {count}")))
    }
}

impl VideoSource for SqliteVideoSource<'_> {
    fn list_videos(&self) -> SourceResult<Vec<Video>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VIDEO_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut videos = Vec::new();
        while let Some(row) = rows.next()? {
            videos.push(parse_video_row(row)?);
        }
        Ok(videos)
    }

    fn get_video_info(&self, id: &VideoId) -> SourceResult<Option<Video>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VIDEO_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt
            .query_row([id.as_str()], |row| {
                Ok((
                    row.get::<_, String>("id")?,
                    row.get::<_, String>("title")?,
                    row.get::<_, String>("channel")?,
                    row.get::<_, i64>("duration_secs")?,
                ))
            })
            .optional()?;

        raw.map(|(id, title, channel, duration)| build_video(id, title, channel, duration))
            .transpose()
    }
}

fn parse_video_row(row: &Row<'_>) -> SourceResult<Video> {
    build_video(
        row.get("id")?,
        row.get("title")?,
        row.get("channel")?,
        row.get("duration_secs")?,
    )
}

fn build_video(id: String, title: String, channel: String, duration: i64) -> SourceResult<Video> {
    let id = VideoId::parse(&id).map_err(|_| {
        SourceError::InvalidData(format!("invalid id value `{id}` in videos.id"))
    })?;
    let duration_secs = u32::try_from(duration).map_err(|_| {
        SourceError::InvalidData(format!(
            "invalid duration `{duration}` in videos.duration_secs"
        ))
    })?;

    let video = Video {
        id,
        title,
        channel,
        duration_secs,
    };
    video.validate()?;
    Ok(video)
}
