//! Media entity: an uploaded asset managed in the CMS.
//!
//! ## Invariants
//! - `filename`, `url` and `mime_type` are non-empty.
//! - A [`MediaSize`] always carries url, width, height, MIME type, filesize
//!   and filename together; partial size records cannot be represented.
//! - Values are never mutated in place: every mutator returns a new `Media`
//!   whose `updated_at` is strictly later than its source.
//! - Equality is by identity (`id`), not by attribute values.

use chrono::{DateTime, Utc};
use mockable::Clock;

use super::timestamps::next_revision;
use super::{ValidationError, ValidationErrorCode};

/// Numeric CMS identifier. `0` marks a value not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(u64);

impl MediaId {
    /// Identifier of a value that has not been persisted.
    pub const PENDING: Self = Self(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_pending(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A resized rendition of the original upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSize {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
    pub filesize: u64,
    pub filename: String,
}

/// Named renditions generated by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSizes {
    pub thumbnail: Option<MediaSize>,
    pub card: Option<MediaSize>,
}

/// Focal point as percentages of width and height, each within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalPoint {
    x: f64,
    y: f64,
}

impl FocalPoint {
    /// Build a focal point, clamping both coordinates into `0..=100`.
    ///
    /// Non-finite coordinates collapse to the centre.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percentage(x),
            y: clamp_percentage(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

fn clamp_percentage(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        50.0
    }
}

/// Input for [`Media::create`].
#[derive(Debug, Clone, Default)]
pub struct MediaDraft {
    pub url: String,
    pub filename: String,
    pub mime_type: String,
    pub filesize: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
}

/// Full attribute set used by [`Media::reconstruct`].
#[derive(Debug, Clone)]
pub struct MediaParts {
    pub id: MediaId,
    pub url: String,
    pub filename: String,
    pub mime_type: String,
    pub filesize: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub credit: Option<String>,
    pub tags: Vec<String>,
    pub sizes: MediaSizes,
    pub focal_point: Option<FocalPoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Uploaded asset.
#[derive(Debug, Clone)]
pub struct Media {
    id: MediaId,
    url: String,
    filename: String,
    mime_type: String,
    filesize: u64,
    width: Option<u32>,
    height: Option<u32>,
    alt: Option<String>,
    caption: Option<String>,
    credit: Option<String>,
    tags: Vec<String>,
    sizes: MediaSizes,
    focal_point: Option<FocalPoint>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Media {
    /// Build a new, not yet persisted media value.
    ///
    /// # Examples
    /// ```
    /// use folio::domain::{Media, MediaDraft};
    /// use mockable::DefaultClock;
    ///
    /// let media = Media::create(
    ///     MediaDraft {
    ///         url: "/media/cat.png".into(),
    ///         filename: "cat.png".into(),
    ///         mime_type: "image/png".into(),
    ///         filesize: 1024,
    ///         ..MediaDraft::default()
    ///     },
    ///     &DefaultClock,
    /// )
    /// .unwrap();
    /// assert!(media.id().is_pending());
    /// ```
    pub fn create(draft: MediaDraft, clock: &dyn Clock) -> Result<Self, ValidationError> {
        let MediaDraft {
            url,
            filename,
            mime_type,
            filesize,
            width,
            height,
            alt,
        } = draft;
        require(&filename, ValidationErrorCode::MediaFilenameRequired)?;
        require(&url, ValidationErrorCode::MediaUrlRequired)?;
        require(&mime_type, ValidationErrorCode::MediaMimeTypeRequired)?;

        let now = clock.utc();
        Ok(Self {
            id: MediaId::PENDING,
            url,
            filename,
            mime_type,
            filesize,
            width,
            height,
            alt,
            caption: None,
            credit: None,
            tags: Vec::new(),
            sizes: MediaSizes::default(),
            focal_point: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a persisted media value.
    pub fn reconstruct(parts: MediaParts) -> Result<Self, ValidationError> {
        require(&parts.filename, ValidationErrorCode::MediaFilenameRequired)?;
        require(&parts.url, ValidationErrorCode::MediaUrlRequired)?;
        require(&parts.mime_type, ValidationErrorCode::MediaMimeTypeRequired)?;
        let MediaParts {
            id,
            url,
            filename,
            mime_type,
            filesize,
            width,
            height,
            alt,
            caption,
            credit,
            tags,
            sizes,
            focal_point,
            created_at,
            updated_at,
        } = parts;
        Ok(Self {
            id,
            url,
            filename,
            mime_type,
            filesize,
            width,
            height,
            alt,
            caption,
            credit,
            tags,
            sizes,
            focal_point,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> MediaId {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn filesize(&self) -> u64 {
        self.filesize
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn credit(&self) -> Option<&str> {
        self.credit.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn sizes(&self) -> &MediaSizes {
        &self.sizes
    }

    pub fn focal_point(&self) -> Option<FocalPoint> {
        self.focal_point
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// `true` when non-blank alternative text is set.
    pub fn has_alt(&self) -> bool {
        self.alt.as_deref().is_some_and(|alt| !alt.trim().is_empty())
    }

    /// Width divided by height, when both are known and height is non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(width), Some(height)) if height > 0 => Some(f64::from(width) / f64::from(height)),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.trim();
        self.tags.iter().any(|existing| existing.eq_ignore_ascii_case(needle))
    }

    /// Copy with new alternative text.
    #[must_use]
    pub fn update_alt(&self, alt: impl Into<String>, clock: &dyn Clock) -> Self {
        let mut next = self.revise(clock);
        next.alt = Some(alt.into());
        next
    }

    /// Copy with a new caption; `None` clears it.
    #[must_use]
    pub fn update_caption(&self, caption: Option<String>, clock: &dyn Clock) -> Self {
        let mut next = self.revise(clock);
        next.caption = caption;
        next
    }

    /// Copy with a new credit line; `None` clears it.
    #[must_use]
    pub fn update_credit(&self, credit: Option<String>, clock: &dyn Clock) -> Self {
        let mut next = self.revise(clock);
        next.credit = credit;
        next
    }

    /// Copy with `tag` appended unless an equal tag (ignoring case) exists.
    #[must_use]
    pub fn add_tag(&self, tag: impl Into<String>, clock: &dyn Clock) -> Self {
        let tag = tag.into();
        let mut next = self.revise(clock);
        let trimmed = tag.trim();
        if !trimmed.is_empty() && !self.has_tag(trimmed) {
            next.tags.push(trimmed.to_owned());
        }
        next
    }

    /// Copy without any tag equal to `tag` (ignoring case).
    #[must_use]
    pub fn remove_tag(&self, tag: &str, clock: &dyn Clock) -> Self {
        let mut next = self.revise(clock);
        let needle = tag.trim();
        next.tags.retain(|existing| !existing.eq_ignore_ascii_case(needle));
        next
    }

    /// Copy with a new focal point.
    #[must_use]
    pub fn set_focal_point(&self, focal_point: FocalPoint, clock: &dyn Clock) -> Self {
        let mut next = self.revise(clock);
        next.focal_point = Some(focal_point);
        next
    }

    fn revise(&self, clock: &dyn Clock) -> Self {
        let mut next = self.clone();
        next.updated_at = next_revision(self.updated_at, clock);
        next
    }
}

impl PartialEq for Media {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Media {}

fn require(value: &str, code: ValidationErrorCode) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(code))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use mockable::MockClock;
    use rstest::rstest;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).single().expect("valid timestamp")
    }

    fn clock_at(seconds: i64) -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(at(seconds));
        clock
    }

    fn base_draft() -> MediaDraft {
        MediaDraft {
            url: "/media/hero.jpg".into(),
            filename: "hero.jpg".into(),
            mime_type: "image/jpeg".into(),
            filesize: 2048,
            width: Some(1600),
            height: Some(900),
            alt: None,
        }
    }

    #[rstest]
    fn create_starts_pending_with_equal_timestamps() {
        let draft = base_draft();
        let media = Media::create(draft, &clock_at(1_000)).expect("valid draft");
        assert!(media.id().is_pending());
        assert_eq!(media.created_at(), media.updated_at());
        assert!(!media.has_alt());
    }

    #[rstest]
    #[case::filename(MediaDraft { filename: " ".into(), ..base_draft() }, ValidationErrorCode::MediaFilenameRequired)]
    #[case::url(MediaDraft { url: String::new(), ..base_draft() }, ValidationErrorCode::MediaUrlRequired)]
    #[case::mime(MediaDraft { mime_type: String::new(), ..base_draft() }, ValidationErrorCode::MediaMimeTypeRequired)]
    fn create_requires_core_fields(#[case] input: MediaDraft, #[case] code: ValidationErrorCode) {
        let err = Media::create(input, &clock_at(1_000)).expect_err("invalid draft");
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn update_alt_returns_new_revision() {
        let draft = base_draft();
        let original = Media::create(draft, &clock_at(1_000)).expect("valid draft");
        let updated = original.update_alt("x", &clock_at(2_000));

        assert_eq!(updated.alt(), Some("x"));
        assert!(updated.updated_at() > original.updated_at());
        assert_eq!(original.alt(), None, "source value is untouched");
        assert_eq!(updated.created_at(), original.created_at());
    }

    #[rstest]
    fn update_alt_orders_revisions_with_a_stalled_clock() {
        let draft = base_draft();
        let clock = clock_at(1_000);
        let original = Media::create(draft, &clock).expect("valid draft");
        let updated = original.update_alt("x", &clock);
        assert_eq!(
            updated.updated_at(),
            original.updated_at() + TimeDelta::microseconds(1)
        );
    }

    #[rstest]
    fn tags_are_case_insensitive() {
        let draft = base_draft();
        let clock = clock_at(1_000);
        let media = Media::create(draft, &clock)
            .expect("valid draft")
            .add_tag("Rust", &clock)
            .add_tag("rust", &clock)
            .add_tag("payload", &clock);
        assert_eq!(media.tags(), ["Rust", "payload"]);
        assert!(media.has_tag("RUST"));

        let without = media.remove_tag("RUST", &clock);
        assert_eq!(without.tags(), ["payload"]);
    }

    #[rstest]
    fn aspect_ratio_needs_both_dimensions() {
        let draft = base_draft();
        let clock = clock_at(1_000);
        let media = Media::create(draft.clone(), &clock).expect("valid draft");
        let ratio = media.aspect_ratio().expect("ratio");
        assert!((ratio - 16.0 / 9.0).abs() < 1e-9);

        let flat = Media::create(MediaDraft { height: Some(0), ..draft }, &clock).expect("valid");
        assert_eq!(flat.aspect_ratio(), None);
    }

    #[rstest]
    fn kind_predicates_follow_mime_type() {
        let draft = base_draft();
        let clock = clock_at(1_000);
        let image = Media::create(draft.clone(), &clock).expect("valid draft");
        assert!(image.is_image() && !image.is_video());
        let video = Media::create(
            MediaDraft {
                mime_type: "video/mp4".into(),
                ..draft
            },
            &clock,
        )
        .expect("valid draft");
        assert!(video.is_video());
    }

    #[rstest]
    #[case(120.0, -5.0, 100.0, 0.0)]
    #[case(f64::NAN, 30.0, 50.0, 30.0)]
    fn focal_point_clamps(#[case] x: f64, #[case] y: f64, #[case] ex: f64, #[case] ey: f64) {
        let point = FocalPoint::new(x, y);
        assert_eq!((point.x(), point.y()), (ex, ey));
    }

    #[rstest]
    fn equality_is_by_identity() {
        let draft = base_draft();
        let clock = clock_at(1_000);
        let media = Media::create(draft, &clock).expect("valid draft");
        let renamed = media.update_alt("different", &clock);
        assert_eq!(media, renamed);
    }
}
