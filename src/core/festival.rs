//! Static festival content: about blurb, stats, events, sponsors.

use chrono::NaiveDate;

use super::effects::Hue;

pub const FEST_NAME: &str = "AARUNYA 2.0";
pub const TAGLINE: &str = "The biggest college fest of Central India is back!";
pub const THEME: &str = "KIDCORE";

/// First day of the festival.
pub const START: (i32, u32, u32) = (2025, 3, 15);
pub const DAYS: i64 = 3;

pub const ABOUT: &[&str] = &[
    "Aarunya 2.0 is the annual techno-cultural festival of MITS Gwalior, \
     where creativity meets chaos in the most beautiful way possible!",
    "From mind-bending hackathons to electrifying dance battles, from robot wars \
     to battle of bands - we've got it all! This year's theme? KIDCORE - a \
     nostalgic trip to the 90s with a futuristic twist!",
];

pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
}

pub const STATS: &[Stat] = &[
    Stat { number: "50+", label: "EVENTS", emoji: "🎮" },
    Stat { number: "10K+", label: "FOOTFALL", emoji: "👥" },
    Stat { number: "₹5L+", label: "PRIZES", emoji: "🏆" },
    Stat { number: "3", label: "DAYS", emoji: "📅" },
];

pub struct Event {
    pub title: &'static str,
    pub category: &'static str,
    /// (year, month, day)
    pub date: (i32, u32, u32),
    pub time: &'static str,
    pub venue: &'static str,
    pub team_size: &'static str,
    pub hue: Hue,
}

impl Event {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.date.0, self.date.1, self.date.2)
    }
}

pub const EVENTS: &[Event] = &[
    Event {
        title: "CODE MAYHEM",
        category: "TECH",
        date: (2025, 3, 15),
        time: "10:00 AM",
        venue: "Main Auditorium",
        team_size: "1-3 Members",
        hue: Hue::Pink,
    },
    Event {
        title: "DANCE BATTLE",
        category: "CULTURAL",
        date: (2025, 3, 15),
        time: "2:00 PM",
        venue: "Open Air Theater",
        team_size: "4-8 Members",
        hue: Hue::Green,
    },
    Event {
        title: "ROBO WARS",
        category: "ROBOTICS",
        date: (2025, 3, 16),
        time: "11:00 AM",
        venue: "Tech Arena",
        team_size: "2-4 Members",
        hue: Hue::Cyan,
    },
    Event {
        title: "BATTLE OF BANDS",
        category: "MUSIC",
        date: (2025, 3, 16),
        time: "5:00 PM",
        venue: "Main Stage",
        team_size: "4-6 Members",
        hue: Hue::Yellow,
    },
    Event {
        title: "GAMING ARENA",
        category: "ESPORTS",
        date: (2025, 3, 17),
        time: "9:00 AM",
        venue: "Gaming Zone",
        team_size: "1-5 Members",
        hue: Hue::Amber,
    },
    Event {
        title: "ART ATTACK",
        category: "ART",
        date: (2025, 3, 17),
        time: "1:00 PM",
        venue: "Art Gallery",
        team_size: "Individual",
        hue: Hue::Pink,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Platinum,
    Gold,
    Silver,
}

impl Tier {
    pub const ALL: &[Tier] = &[Tier::Platinum, Tier::Gold, Tier::Silver];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Platinum => "PLATINUM",
            Tier::Gold => "GOLD",
            Tier::Silver => "SILVER",
        }
    }
}

pub struct Sponsor {
    pub name: &'static str,
    pub tier: Tier,
    pub logo: &'static str,
}

pub const SPONSORS: &[Sponsor] = &[
    Sponsor { name: "TechCorp", tier: Tier::Platinum, logo: "🏢" },
    Sponsor { name: "GameZone", tier: Tier::Platinum, logo: "🎮" },
    Sponsor { name: "DrinkMax", tier: Tier::Gold, logo: "🥤" },
    Sponsor { name: "FoodHub", tier: Tier::Gold, logo: "🍔" },
    Sponsor { name: "MusicBox", tier: Tier::Gold, logo: "🎵" },
    Sponsor { name: "StyleUp", tier: Tier::Silver, logo: "👕" },
    Sponsor { name: "TechGear", tier: Tier::Silver, logo: "⌨" },
    Sponsor { name: "EduPro", tier: Tier::Silver, logo: "📚" },
];

pub fn sponsors_in(tier: Tier) -> impl Iterator<Item = &'static Sponsor> {
    SPONSORS.iter().filter(move |s| s.tier == tier)
}

/// Decorative stickers floating around the hero.
pub const STICKERS: &[&str] = &["⭐", "⚡", "🌈", "💖", "🎮", "🎪", "🌟", "🎵", "🔥", "💫"];

pub const SOCIALS: &[(&str, &str)] = &[
    ("Instagram", "📸"),
    ("Twitter", "🐦"),
    ("Discord", "💬"),
    ("YouTube", "▶"),
];

/// Where `today` sits relative to the festival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    DaysLeft(i64),
    Live { day: i64 },
    Over,
}

pub fn countdown(today: NaiveDate) -> Countdown {
    let Some(start) = NaiveDate::from_ymd_opt(START.0, START.1, START.2) else {
        return Countdown::Over;
    };
    let delta = (start - today).num_days();
    if delta > 0 {
        Countdown::DaysLeft(delta)
    } else if -delta < DAYS {
        Countdown::Live { day: 1 - delta }
    } else {
        Countdown::Over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn countdown_before_during_after() {
        assert_eq!(countdown(day(2025, 3, 1)), Countdown::DaysLeft(14));
        assert_eq!(countdown(day(2025, 3, 15)), Countdown::Live { day: 1 });
        assert_eq!(countdown(day(2025, 3, 17)), Countdown::Live { day: 3 });
        assert_eq!(countdown(day(2025, 3, 18)), Countdown::Over);
    }

    #[test]
    fn event_dates_fall_within_the_festival() {
        let start = day(START.0, START.1, START.2);
        for event in EVENTS {
            let date = event.date().unwrap();
            let offset = (date - start).num_days();
            assert!((0..DAYS).contains(&offset), "{} is outside the fest", event.title);
        }
    }

    #[test]
    fn every_tier_has_sponsors() {
        for &tier in Tier::ALL {
            assert!(sponsors_in(tier).count() > 0);
        }
    }
}
