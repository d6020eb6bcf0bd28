//! The bundled demo catalog.
//!
//! Used to seed [`AppState::load_mock_data`](crate::store::AppState::load_mock_data)
//! and, through its [`ArtSource`] impl, to run the whole store offline.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::{ArtSource, AuthResponse, RegisterRequest};
use crate::error::Error;
use crate::models::{Artist, ArtistStats, Artwork, ArtworkStats, Curation, User, UserRef};
use crate::store::new_id;

const YANG_AVATAR: &str = "./images/artists/yangxiping_avatar.jpg";
const WANG_AVATAR: &str = "./images/artists/wangzhengchun_avatar.jpg";

/// (id, title, artist id, image, gradient, likes, comments)
type ArtworkRow = (&'static str, &'static str, &'static str, &'static str, [&'static str; 2], u32, u32);

const ARTWORKS: &[ArtworkRow] = &[
    ("artwork1", "Autumn Colors", "artist1", "autumn_colors.jpg", ["#8B4513", "#D2691E"], 2800, 125),
    ("artwork2", "Charm of the Shu Mountains I", "artist1", "shu_mountains_charm_1.jpg", ["#2F4F4F", "#708090"], 2100, 89),
    ("artwork3", "Rhythm of Green Hills", "artist1", "rhythm_of_green_hills.jpg", ["#228B22", "#32CD32"], 1950, 67),
    ("artwork4", "Morning Charm", "artist1", "morning_charm.jpg", ["#CD853F", "#DEB887"], 1680, 45),
    ("artwork5", "Autumn Herding", "artist1", "autumn_herding.jpg", ["#CD853F", "#DEB887"], 1580, 42),
    ("artwork6", "Autumn Rhythm of the Shu Mountains", "artist1", "autumn_rhythm_shu_mountains.jpg", ["#8B4513", "#CD853F"], 1750, 55),
    ("artwork7", "Autumn Sentiment", "artist1", "autumn_sentiment.jpg", ["#B8860B", "#DAA520"], 1920, 73),
    ("artwork8", "Autumn in the Shu Mountains", "artist1", "autumn_in_shu_mountains.jpg", ["#8B4513", "#A0522D"], 2050, 88),
    ("artwork9", "Return to the Shu Mountains", "artist1", "return_to_shu_mountains.jpg", ["#556B2F", "#6B8E23"], 1650, 51),
    ("artwork10", "Traveling the Shu River", "artist1", "traveling_shu_river.jpg", ["#20B2AA", "#48D1CC"], 1780, 64),
    ("artwork11", "Spring Song of the Shu Mountains", "artist2", "wangzhengchun_1.jpg", ["#4169E1", "#6495ED"], 1420, 38),
    ("artwork12", "High Mountains, Long Rivers", "artist2", "wangzhengchun_2.jpg", ["#DC143C", "#FF6347"], 1180, 29),
    ("artwork13", "Landscape Sentiment", "artist2", "wangzhengchun_3.jpg", ["#228B22", "#32CD32"], 1350, 42),
    ("artwork14", "Clouds over Misty Seas", "artist2", "wangzhengchun_4.jpg", ["#9370DB", "#BA55D3"], 1620, 51),
    ("artwork15", "Golden Autumn Retreat", "artist2", "wangzhengchun_5.jpg", ["#FF4500", "#FF8C00"], 1890, 67),
    ("artwork16", "Spring Hills like Ink", "artist2", "wangzhengchun_6.jpg", ["#00CED1", "#40E0D0"], 1450, 35),
];

/// A self-contained data set: the demo user, the user directory and the
/// public catalog.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    /// The demo session user
    pub user: User,
    /// Every known user, the demo user included
    pub users: Vec<User>,
    pub artworks: Vec<Artwork>,
    pub artists: Vec<Artist>,
    pub curations: Vec<Curation>,
}

impl MockCatalog {
    /// The catalog shipped with the crate
    pub fn bundled() -> Self {
        let user = User {
            id: "user1".to_string(),
            name: "My Profile".to_string(),
            username: "myprofile".to_string(),
            email: "user@example.com".to_string(),
            followers: 256,
            following: 89,
            artworks: 12,
            followers_list: vec!["artist2".to_string()],
            following_list: vec!["artist1".to_string()],
            ..Default::default()
        };

        let yang = User {
            id: "artist1".to_string(),
            name: "Yang Xiping".to_string(),
            username: "yangxiping".to_string(),
            email: "yangxiping@example.com".to_string(),
            is_artist: true,
            followers: 2800,
            following: 120,
            avatar: Some(YANG_AVATAR.to_string()),
            bio: Some("Ink painter born in Chengdu in 1958.".to_string()),
            tags: vec!["ink".to_string(), "landscape".to_string()],
            followers_list: vec!["user1".to_string()],
            ..Default::default()
        };

        let wang = User {
            id: "artist2".to_string(),
            name: "Wang Zhengchun".to_string(),
            username: "wangzhengchun".to_string(),
            email: "wangzhengchun@example.com".to_string(),
            is_artist: true,
            followers: 1650,
            following: 85,
            avatar: Some(WANG_AVATAR.to_string()),
            bio: Some("Bird-and-flower and landscape painter from Chengdu.".to_string()),
            tags: vec!["bird-and-flower".to_string(), "landscape".to_string()],
            following_list: vec!["user1".to_string()],
            ..Default::default()
        };

        let artist_ref = |id: &str| -> UserRef {
            match id {
                "artist1" => yang.summary(),
                _ => wang.summary(),
            }
        };

        let artworks: Vec<Artwork> = ARTWORKS
            .iter()
            .map(|&(id, title, artist, image, gradient, likes, comments)| Artwork {
                id: id.to_string(),
                title: title.to_string(),
                image: format!("./images/artworks/{}", image),
                artist: artist_ref(artist),
                gradient: gradient.iter().map(|c| c.to_string()).collect(),
                stats: ArtworkStats { likes, comments },
                ..Default::default()
            })
            .collect();

        let artists = vec![
            artist_from(&yang, "Ink painter · Chengdu", 5, true, &artworks),
            artist_from(&wang, "Landscape painter · Chengdu", 3, false, &artworks),
        ];

        let curations = vec![
            curation(
                "curation1",
                "Eastern Aesthetics, Contemporary Voices",
                "Traditional eastern aesthetics translated into a contemporary setting.",
                ("curator-chen", "Chen Ming"),
                &["artwork1", "artwork11", "artwork3"],
                &artworks,
            ),
            curation(
                "curation2",
                "Ink in the Digital Age",
                "New expressions of ink painting.",
                ("curator-lin", "Lin Xiaoyu"),
                &["artwork2", "artwork14"],
                &artworks,
            ),
            curation(
                "curation3",
                "Seasons of the Shu Mountains",
                "A year in the hills west of Chengdu.",
                ("curator-wang", "Wang Wei"),
                &["artwork6", "artwork8", "artwork9", "artwork16"],
                &artworks,
            ),
        ];

        Self {
            users: vec![user.clone(), yang, wang],
            user,
            artworks,
            artists,
            curations,
        }
    }
}

fn artist_from(
    user: &User,
    location: &str,
    curations: u32,
    is_following: bool,
    artworks: &[Artwork],
) -> Artist {
    let own: Vec<&Artwork> = artworks.iter().filter(|a| a.artist.id == user.id).collect();

    Artist {
        id: user.id.clone(),
        name: user.name.clone(),
        avatar: user.avatar.clone().unwrap_or_default(),
        cover: None,
        location: Some(location.to_string()),
        bio: user.bio.clone().unwrap_or_default(),
        tags: user.tags.clone(),
        stats: ArtistStats {
            artworks: own.len() as u32,
            followers: user.followers,
            likes: own.iter().map(|a| a.stats.likes).sum(),
            curations,
        },
        is_following,
        has_story_update: Some(is_following),
    }
}

fn curation(
    id: &str,
    title: &str,
    description: &str,
    (curator_id, curator_name): (&str, &str),
    ids: &[&str],
    artworks: &[Artwork],
) -> Curation {
    let cover_image = ids
        .first()
        .and_then(|first| artworks.iter().find(|a| a.id == *first))
        .map(|a| a.image.clone())
        .unwrap_or_default();

    Curation {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        curator: UserRef {
            id: curator_id.to_string(),
            name: curator_name.to_string(),
            avatar: String::new(),
        },
        artworks: ids.iter().map(|id| id.to_string()).collect(),
        cover_image,
        ..Default::default()
    }
}

/// [`ArtSource`] serving a [`MockCatalog`] from memory.
///
/// Sign-in accepts any non-empty password for a known email. Registration
/// adds the new user to the directory.
pub struct MockSource {
    catalog: Mutex<MockCatalog>,
}

impl MockSource {
    pub fn new(catalog: MockCatalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
        }
    }

    pub fn bundled() -> Self {
        Self::new(MockCatalog::bundled())
    }

    fn catalog(&self) -> std::sync::MutexGuard<'_, MockCatalog> {
        self.catalog
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ArtSource for MockSource {
    async fn fetch_artworks(&self, offset: usize, limit: usize) -> Result<Vec<Artwork>, Error> {
        Ok(self
            .catalog()
            .artworks
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_artists(&self) -> Result<Vec<Artist>, Error> {
        Ok(self.catalog().artists.clone())
    }

    async fn fetch_curations(&self) -> Result<Vec<Curation>, Error> {
        Ok(self.catalog().curations.clone())
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        if password.is_empty() {
            return Err(Error::auth("Invalid credentials"));
        }

        let user = self
            .catalog()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or_else(|| Error::auth("Invalid credentials"))?;

        Ok(AuthResponse {
            token: new_id("mock-token"),
            user,
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, Error> {
        if !request.is_complete() {
            return Err(Error::auth("Name, email and password are required"));
        }

        let mut catalog = self.catalog();
        if catalog
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&request.email))
        {
            return Err(Error::auth("Email already registered"));
        }

        let user = User {
            id: new_id("user"),
            name: request.name.clone(),
            username: request
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
            email: request.email.clone(),
            is_artist: request.is_artist,
            ..Default::default()
        };
        catalog.users.push(user.clone());

        Ok(AuthResponse {
            token: new_id("mock-token"),
            user,
        })
    }

    async fn logout(&self) -> Result<(), Error> {
        Ok(())
    }

    fn set_token(&self, _token: Option<String>) {}
}
