//! The product roadmap advertised on the landing page.
//!
//! Eight modules, each tagged with the rollout phase it is planned for. Only
//! the template market is live (it carries an `href`); the rest is catalog
//! copy. Phase labels map to accent colors through an explicit table with a
//! fallback for labels the table does not know.

/// Rollout phase of a roadmap module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    One,
    Two,
    Three,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::One, Phase::Two, Phase::Three];

    pub fn label(self) -> &'static str {
        match self {
            Phase::One => "Phase 1",
            Phase::Two => "Phase 2",
            Phase::Three => "Phase 3",
        }
    }

    pub fn color(self) -> &'static str {
        phase_color(self.label())
    }
}

/// Accent color for unknown phase labels.
pub const FALLBACK_PHASE_COLOR: &str = "#94A3B8";

const PHASE_COLORS: &[(&str, &str)] = &[
    ("Phase 1", "#22C55E"),
    ("Phase 2", "#F59E0B"),
    ("Phase 3", "#6C63FF"),
];

/// Look up the accent color for a phase label.
pub fn phase_color(label: &str) -> &'static str {
    PHASE_COLORS
        .iter()
        .find(|(phase, _)| *phase == label)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_PHASE_COLOR)
}

/// One product module on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadmapModule {
    pub title: &'static str,
    pub description: &'static str,
    pub phase: Phase,
    pub tags: &'static [&'static str],
    /// Route of the live module, if it has shipped.
    pub href: Option<&'static str>,
}

pub const MODULES: &[RoadmapModule] = &[
    RoadmapModule {
        title: "Creative Job Board",
        description: "Remote jobs from WeWorkRemotely, RemoteOK & HN Hiring, filtered for creatives.",
        phase: Phase::One,
        tags: &["Design", "Frontend", "Web3"],
        href: None,
    },
    RoadmapModule {
        title: "Template Market",
        description: "Top-selling themes & templates from ThemeForest, Webflow, Framer & Notion.",
        phase: Phase::One,
        tags: &["WordPress", "Webflow", "Framer"],
        href: Some("/templates"),
    },
    RoadmapModule {
        title: "AI & SaaS Tool Hunter",
        description: "Hottest AI tools from Product Hunt & FutureTools, updated daily.",
        phase: Phase::One,
        tags: &["AI", "SaaS", "Productivity"],
        href: None,
    },
    RoadmapModule {
        title: "Deal Drop",
        description: "Price drops on cameras, drones, GPUs & lifetime software deals.",
        phase: Phase::Two,
        tags: &["Amazon", "AppSumo", "Tech"],
        href: None,
    },
    RoadmapModule {
        title: "Learning & Courses",
        description: "Discounted courses in Python, React, Photography & more.",
        phase: Phase::Two,
        tags: &["Udemy", "Coursera", "Skills"],
        href: None,
    },
    RoadmapModule {
        title: "Creative Assets",
        description: "Free photos, trending fonts, 3D assets, curated daily.",
        phase: Phase::Two,
        tags: &["Unsplash", "Fonts", "3D"],
        href: None,
    },
    RoadmapModule {
        title: "Crypto & Market Watch",
        description: "Track Metaverse, Render & AI tokens plus NFT floor movers.",
        phase: Phase::Three,
        tags: &["CoinGecko", "NFTs", "DeFi"],
        href: None,
    },
    RoadmapModule {
        title: "Inspiration Feed",
        description: "Popular shots from Dribbble, Behance & Awwwards Site of the Day.",
        phase: Phase::Three,
        tags: &["UI/UX", "Design", "Awards"],
        href: None,
    },
];

/// Modules planned for `phase`, in catalog order.
pub fn modules_in(phase: Phase) -> impl Iterator<Item = &'static RoadmapModule> {
    MODULES.iter().filter(move |m| m.phase == phase)
}
