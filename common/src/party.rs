use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique party identifier, assigned at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartyId(pub u64);

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A political party profile.
///
/// Serialized camelCase so the persisted JSON keeps the layout the store
/// has always written (`createdAt`, bare `id` numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub slogan: String,
    pub description: String,
    /// Display color, any string form (typically "#rrggbb"). Not validated.
    pub color: String,
    /// Free-text category label; the sole filter dimension.
    pub ideology: String,
    pub founder: String,
    /// Embedded logo as a data URL (or a plain URL for seed data).
    /// `None` renders the fallback initial on the party color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Supporter count. Starts at 0, only ever incremented.
    pub supports: u32,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a party.
///
/// `id`, `supports` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct PartyDraft {
    pub name: String,
    pub slogan: String,
    pub description: String,
    pub color: String,
    pub ideology: String,
    pub founder: String,
    pub logo: Option<String>,
}

/// Encode raw logo bytes as an embeddable data URL.
pub fn encode_logo(content_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{encoded}")
}

/// Guess an image content type from a filename extension.
/// Unknown extensions fall back to `application/octet-stream`.
pub fn guess_content_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// The fixed demonstration dataset used when no persisted data exists.
///
/// Content must stay byte-for-byte stable: ids 1–3, supports 3/5/2, and
/// the exact names, slogans, descriptions, founders, colors and logos.
pub fn demo_parties() -> Vec<Party> {
    let now = Utc::now();
    vec![
        Party {
            id: PartyId(1),
            name: "Progressive Democratic Alliance".into(),
            slogan: "Progress Through Unity".into(),
            description: "The Progressive Democratic Alliance advocates for comprehensive social reform, environmental sustainability, and economic equality. Our platform includes universal healthcare, progressive taxation, renewable energy transition, and strengthening democratic institutions.".into(),
            color: "#2563eb".into(),
            ideology: "Social Democracy".into(),
            founder: "Elizabeth Warren".into(),
            logo: Some("https://upload.wikimedia.org/wikipedia/commons/thumb/0/02/DemocraticLogo.svg/200px-DemocraticLogo.svg.png".into()),
            supports: 3,
            created_at: now,
        },
        Party {
            id: PartyId(2),
            name: "Conservative Unity Party".into(),
            slogan: "Tradition, Freedom, Prosperity".into(),
            description: "The Conservative Unity Party champions traditional values, free market economics, and limited government. We believe in fiscal responsibility, strong defense, constitutional originalism, and preserving our nation's founding principles.".into(),
            color: "#dc2626".into(),
            ideology: "Conservatism".into(),
            founder: "Robert Thompson".into(),
            logo: Some("https://upload.wikimedia.org/wikipedia/commons/thumb/9/9b/Republicanlogo.svg/200px-Republicanlogo.svg.png".into()),
            supports: 5,
            created_at: now,
        },
        Party {
            id: PartyId(3),
            name: "Green Future Coalition".into(),
            slogan: "Sustainability for Tomorrow".into(),
            description: "The Green Future Coalition prioritizes environmental protection, climate action, and sustainable development. Our comprehensive green new deal includes renewable energy investment, carbon neutrality goals, and environmental justice initiatives.".into(),
            color: "#16a34a".into(),
            ideology: "Green Politics".into(),
            founder: "Dr. Maria Rodriguez".into(),
            logo: Some("https://img.icons8.com/color/96/000000/leaf.png".into()),
            supports: 2,
            created_at: now,
        },
    ]
}
