//! Static site data and the record shapes read from message bundles.

use serde::Deserialize;

/// A testimonial as stored under `Testimonials.reviews`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Testimonial {
    pub opinion: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: String,
}

/// `Skills.{category}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// `Experience.{key}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub location: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// `Education.{key}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Study {
    pub institution: String,
    pub degree: String,
    pub duration: String,
    #[serde(default)]
    pub details: String,
}

pub struct CategoryStyle {
    pub key: &'static str,
    pub icon: &'static str,
    pub gradient: &'static str,
}

pub const SKILL_CATEGORIES: [CategoryStyle; 3] = [
    CategoryStyle {
        key: "frontend",
        icon: "code",
        gradient: "from-blue-500 to-cyan-500",
    },
    CategoryStyle {
        key: "apis",
        icon: "zap",
        gradient: "from-orange-500 to-yellow-500",
    },
    CategoryStyle {
        key: "workflow",
        icon: "workflow",
        gradient: "from-green-500 to-teal-500",
    },
];

pub const EXPERIENCE: [&str; 2] = ["freelance", "almdrasa"];
pub const EDUCATION: [&str; 2] = ["almdrasa", "zagazig"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillLevel {
    Expert,
    Advanced,
    Proficient,
    Other,
}

impl SkillLevel {
    /// Reads a localized level label.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Expert" | "خبير" => SkillLevel::Expert,
            "Advanced" | "متقدم" => SkillLevel::Advanced,
            "Proficient" | "ماهر" => SkillLevel::Proficient,
            _ => SkillLevel::Other,
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            SkillLevel::Expert => "bg-green-100 dark:bg-green-900/30 text-green-700 dark:text-green-400",
            SkillLevel::Advanced => "bg-blue-100 dark:bg-blue-900/30 text-blue-700 dark:text-blue-400",
            SkillLevel::Proficient => {
                "bg-yellow-100 dark:bg-yellow-900/30 text-yellow-700 dark:text-yellow-400"
            }
            SkillLevel::Other => "bg-gray-100 dark:bg-gray-900/30 text-gray-700 dark:text-gray-400",
        }
    }
}

pub struct Author {
    pub name: &'static str,
    pub avatar: &'static str,
}

/// A blog post. Texts live in the bundles under `BlogPosts.{content_key}`.
pub struct BlogPost {
    pub slug: &'static str,
    pub content_key: &'static str,
    /// `YYYY-MM-DD`.
    pub date: &'static str,
    pub read_time: u32,
    pub tags: &'static [&'static str],
    pub author: Author,
    pub cover_image: &'static str,
    /// Illustrations for the first, third and fourth content sections.
    pub illustrations: [&'static str; 3],
}

pub static POSTS: [BlogPost; 1] = [BlogPost {
    slug: "how-computers-store-data",
    content_key: "binary",
    date: "2024-03-15",
    read_time: 8,
    tags: &["Computer Science", "Binary", "Fundamentals"],
    author: Author {
        name: "Yusif Ayman",
        avatar: "/yusif.jpg",
    },
    cover_image: "/blog/binary/cover.png",
    illustrations: [
        "/blog/binary/conversion.png",
        "/blog/binary/text-and-colors.png",
        "/blog/binary/image-storage.png",
    ],
}];

pub fn post(slug: &str) -> Option<&'static BlogPost> {
    POSTS.iter().find(|p| p.slug == slug)
}

/// Content sections of a post, in reading order, with the illustration that
/// follows each one.
pub const POST_SECTIONS: [(&str, Option<usize>); 4] = [
    ("whyBinaryMatters", Some(0)),
    ("binaryInRam", None),
    ("encodingTextColors", Some(1)),
    ("practicalExample", Some(2)),
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `2024-03-15` as `March 15, 2024`. `None` for anything that is not a valid
/// calendar date.
pub fn format_date(date: &str) -> Option<String> {
    let mut parts = date.trim().splitn(3, '-');
    let year: u32 = parts.next()?.parse().ok()?;
    let month: usize = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let name = MONTHS.get(month.checked_sub(1)?)?;
    if day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some(format!("{name} {day}, {year}"))
}

fn days_in_month(year: u32, month: usize) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
