use tracing::warn;

/// Icons a section item may ask for. Anything else renders as [`Icon::Star`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Icon {
    #[default]
    Star,
    User,
    Users,
    Settings,
    Heart,
    Shield,
    Zap,
    Clock,
    Globe,
    Mail,
    Phone,
    MapPin,
    Camera,
    ShoppingCart,
    Truck,
    Award,
    Coffee,
    Book,
    Check,
    Sparkles,
    Leaf,
    Smile,
    TrendingUp,
    Lock,
    Gift,
    Music,
    Code,
    Rocket,
}

/// Normalized name → icon. Aliases cover names models commonly emit.
const ICON_NAMES: &[(&str, Icon)] = &[
    ("star", Icon::Star),
    ("user", Icon::User),
    ("person", Icon::User),
    ("users", Icon::Users),
    ("team", Icon::Users),
    ("settings", Icon::Settings),
    ("cog", Icon::Settings),
    ("gear", Icon::Settings),
    ("heart", Icon::Heart),
    ("shield", Icon::Shield),
    ("shieldcheck", Icon::Shield),
    ("zap", Icon::Zap),
    ("bolt", Icon::Zap),
    ("clock", Icon::Clock),
    ("time", Icon::Clock),
    ("globe", Icon::Globe),
    ("world", Icon::Globe),
    ("mail", Icon::Mail),
    ("email", Icon::Mail),
    ("phone", Icon::Phone),
    ("mappin", Icon::MapPin),
    ("location", Icon::MapPin),
    ("camera", Icon::Camera),
    ("shoppingcart", Icon::ShoppingCart),
    ("shoppingbag", Icon::ShoppingCart),
    ("cart", Icon::ShoppingCart),
    ("truck", Icon::Truck),
    ("delivery", Icon::Truck),
    ("award", Icon::Award),
    ("trophy", Icon::Award),
    ("coffee", Icon::Coffee),
    ("book", Icon::Book),
    ("bookopen", Icon::Book),
    ("check", Icon::Check),
    ("checkcircle", Icon::Check),
    ("sparkles", Icon::Sparkles),
    ("leaf", Icon::Leaf),
    ("smile", Icon::Smile),
    ("trendingup", Icon::TrendingUp),
    ("chart", Icon::TrendingUp),
    ("lock", Icon::Lock),
    ("gift", Icon::Gift),
    ("music", Icon::Music),
    ("code", Icon::Code),
    ("rocket", Icon::Rocket),
];

impl Icon {
    /// Resolve a suggested icon name. Case, `-`, `_` and spaces are ignored.
    pub fn resolve(name: Option<&str>) -> Icon {
        let Some(name) = name else {
            return Icon::default();
        };

        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match ICON_NAMES.iter().find(|(n, _)| *n == normalized) {
            Some((_, icon)) => *icon,
            None => {
                warn!(icon = name, "unknown icon name, using default");
                Icon::default()
            }
        }
    }

    /// Glyph drawn in place of the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Star => "★",
            Icon::User => "👤",
            Icon::Users => "👥",
            Icon::Settings => "⚙",
            Icon::Heart => "♥",
            Icon::Shield => "🛡",
            Icon::Zap => "⚡",
            Icon::Clock => "🕒",
            Icon::Globe => "🌐",
            Icon::Mail => "✉",
            Icon::Phone => "☎",
            Icon::MapPin => "📍",
            Icon::Camera => "📷",
            Icon::ShoppingCart => "🛒",
            Icon::Truck => "🚚",
            Icon::Award => "🏆",
            Icon::Coffee => "☕",
            Icon::Book => "📖",
            Icon::Check => "✔",
            Icon::Sparkles => "✨",
            Icon::Leaf => "🍃",
            Icon::Smile => "☺",
            Icon::TrendingUp => "📈",
            Icon::Lock => "🔒",
            Icon::Gift => "🎁",
            Icon::Music => "♪",
            Icon::Code => "⌨",
            Icon::Rocket => "🚀",
        }
    }
}
