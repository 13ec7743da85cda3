//! Type-specific content payloads.
//!
//! Every content type carries its own payload shape. The body serializes as
//! `{ "type": "<content_type>", "payload": { ... } }`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stillpoint_core::error::DomainError;

/// The nine fixed content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    PhotoCollage,
    VideoContent,
    BookPublication,
    MixedMedia,
    Poster,
    Testimonial,
    TeamMember,
    Achievement,
    Service,
}

impl ContentType {
    /// Every content type.
    pub const ALL: [ContentType; 9] = [
        ContentType::PhotoCollage,
        ContentType::VideoContent,
        ContentType::BookPublication,
        ContentType::MixedMedia,
        ContentType::Poster,
        ContentType::Testimonial,
        ContentType::TeamMember,
        ContentType::Achievement,
        ContentType::Service,
    ];

    /// Returns the wire name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::PhotoCollage => "photo_collage",
            ContentType::VideoContent => "video_content",
            ContentType::BookPublication => "book_publication",
            ContentType::MixedMedia => "mixed_media",
            ContentType::Poster => "poster",
            ContentType::Testimonial => "testimonial",
            ContentType::TeamMember => "team_member",
            ContentType::Achievement => "achievement",
            ContentType::Service => "service",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown content type: {s}")))
    }
}

/// An image within a photo collage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollageImage {
    /// Image URL.
    pub url: String,
    /// Optional caption shown under the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// The kind of a mixed-media block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaBlockKind {
    /// Plain text.
    Text,
    /// An image URL.
    Image,
    /// A video URL.
    Video,
}

/// One block of a mixed-media piece: text, or the URL of an image or video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    /// What `value` holds.
    pub kind: MediaBlockKind,
    /// Text or URL.
    pub value: String,
}

/// A gallery of images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoCollage {
    /// At least one image.
    pub images: Vec<CollageImage>,
    /// Text shown with the gallery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An embedded video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoContent {
    /// Video URL.
    pub video_url: String,
    /// Preview image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Text shown with the video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A book published by the institute or its teachers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPublication {
    /// Author name.
    pub author: String,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// Where the book can be bought.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_url: Option<String>,
    /// Blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Year of publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<u16>,
}

/// An ordered sequence of text, image and video blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedMedia {
    /// Blocks in display order.
    pub blocks: Vec<MediaBlock>,
}

/// A single poster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poster {
    /// Poster image URL.
    pub image_url: String,
    /// Optional caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A quote from a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Who said it.
    pub author_name: String,
    /// The quote itself.
    pub quote: String,
    /// Role or affiliation of the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_title: Option<String>,
    /// Portrait URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A staff or faculty profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Short biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Portrait URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A milestone worth announcing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// One-line summary.
    pub headline: String,
    /// Longer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Date the milestone was reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_on: Option<chrono::NaiveDate>,
    /// Illustration URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A service the institute offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Service name.
    pub name: String,
    /// What the service involves.
    pub description: String,
    /// Icon identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Link to more details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The payload of a content item, one variant per content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ContentBody {
    PhotoCollage(PhotoCollage),
    VideoContent(VideoContent),
    BookPublication(BookPublication),
    MixedMedia(MixedMedia),
    Poster(Poster),
    Testimonial(Testimonial),
    TeamMember(TeamMember),
    Achievement(Achievement),
    Service(Service),
}

impl ContentBody {
    /// The content type this body belongs to.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        match self {
            ContentBody::PhotoCollage(_) => ContentType::PhotoCollage,
            ContentBody::VideoContent(_) => ContentType::VideoContent,
            ContentBody::BookPublication(_) => ContentType::BookPublication,
            ContentBody::MixedMedia(_) => ContentType::MixedMedia,
            ContentBody::Poster(_) => ContentType::Poster,
            ContentBody::Testimonial(_) => ContentType::Testimonial,
            ContentBody::TeamMember(_) => ContentType::TeamMember,
            ContentBody::Achievement(_) => ContentType::Achievement,
            ContentBody::Service(_) => ContentType::Service,
        }
    }

    /// Checks that every required field of the payload is filled in.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first missing field.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ContentBody::PhotoCollage(collage) => {
                if collage.images.is_empty() {
                    return Err(DomainError::Validation(
                        "a photo collage needs at least one image".to_owned(),
                    ));
                }
                collage
                    .images
                    .iter()
                    .try_for_each(|image| require("images.url", &image.url))
            }
            ContentBody::VideoContent(video) => require("video_url", &video.video_url),
            ContentBody::BookPublication(book) => require("author", &book.author),
            ContentBody::MixedMedia(media) => {
                if media.blocks.is_empty() {
                    return Err(DomainError::Validation(
                        "mixed media needs at least one block".to_owned(),
                    ));
                }
                media
                    .blocks
                    .iter()
                    .try_for_each(|block| require("blocks.value", &block.value))
            }
            ContentBody::Poster(poster) => require("image_url", &poster.image_url),
            ContentBody::Testimonial(testimonial) => {
                require("author_name", &testimonial.author_name)?;
                require("quote", &testimonial.quote)
            }
            ContentBody::TeamMember(member) => {
                require("name", &member.name)?;
                require("position", &member.position)
            }
            ContentBody::Achievement(achievement) => require("headline", &achievement.headline),
            ContentBody::Service(service) => {
                require("name", &service.name)?;
                require("description", &service.description)
            }
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_serializes_with_type_tag_and_payload() {
        let body = ContentBody::Poster(Poster {
            image_url: "https://cdn.example.org/retreat.png".to_owned(),
            caption: None,
        });

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            json!({
                "type": "poster",
                "payload": { "image_url": "https://cdn.example.org/retreat.png" }
            })
        );
    }

    #[test]
    fn test_body_deserializes_variant_from_type_tag() {
        let json = json!({
            "type": "team_member",
            "payload": { "name": "Asha", "position": "Lead instructor" }
        });

        let body: ContentBody = serde_json::from_value(json).unwrap();

        assert_eq!(body.content_type(), ContentType::TeamMember);
    }

    #[test]
    fn test_payload_shape_must_match_type() {
        let json = json!({
            "type": "video_content",
            "payload": { "image_url": "a.png" }
        });

        assert!(serde_json::from_value::<ContentBody>(json).is_err());
    }

    #[test]
    fn test_empty_collage_fails_validation() {
        let body = ContentBody::PhotoCollage(PhotoCollage {
            images: vec![],
            description: None,
        });

        assert!(matches!(body.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_blank_required_field_is_named_in_error() {
        let body = ContentBody::Testimonial(Testimonial {
            author_name: "Ravi".to_owned(),
            quote: "   ".to_owned(),
            author_title: None,
            photo_url: None,
        });

        match body.validate().unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("quote")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_content_type_round_trips_through_wire_name() {
        for content_type in ContentType::ALL {
            assert_eq!(
                content_type.as_str().parse::<ContentType>().unwrap(),
                content_type
            );
        }
    }
}
