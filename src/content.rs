//! Static copy for the page sections.

pub const HEADER_SCROLL_THRESHOLD: f64 = 60.0;

pub const OWNER_NAME: &str = "Alex Rivera";
pub const MONOGRAM: &str = "AR";
pub const CONTACT_EMAIL: &str = "alex@alexrivera.com";
pub const COPYRIGHT: &str = "© 2026 Alex Rivera";
pub const PORTRAIT_URL: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=600&h=800&fit=crop&crop=faces";

pub const NAV_LINKS: [(&str, &str); 3] = [("Work", "#work"), ("About", "#about"), ("Contact", "#contact")];

pub const SKILLS: [&str; 7] = [
    "Premiere Pro",
    "DaVinci Resolve",
    "After Effects",
    "Avid",
    "Color Grading",
    "Sound Design",
    "Motion Graphics",
];

pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat {
        value: "120+",
        label: "Projects Completed",
    },
    Stat {
        value: "8",
        label: "Years Experience",
    },
    Stat {
        value: "15+",
        label: "Awards Won",
    },
    Stat {
        value: "50+",
        label: "Happy Clients",
    },
];

pub const SOCIAL_LINKS: [(&str, &str); 3] = [
    ("Instagram", "https://instagram.com"),
    ("Vimeo", "https://vimeo.com"),
    ("LinkedIn", "https://linkedin.com"),
];

pub fn header_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}
