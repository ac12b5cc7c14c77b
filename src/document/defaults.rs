//! Compiled-in default document, the last tier of the load fallback.

use std::collections::BTreeMap;

use super::model::{
    AudioSource, AudioTrack, CustomSection, EnterpriseSection, HeroBlock, NewsletterBlock, PortfolioItem,
    RosterItem, SiteConfiguration, SiteTheme, VisionBlock,
};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

fn s(value: &str) -> String {
    value.to_owned()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// The template the site ships with before any operator edits or publishes.
#[must_use]
pub fn default_configuration() -> SiteConfiguration {
    SiteConfiguration {
        theme: SiteTheme { background: s("#050505"), surface: s("#0a0a0a"), primary: s("#ffffff"), accent: s("#a1a1aa") },
        admin_password: Some(s(DEFAULT_ADMIN_PASSWORD)),
        spotify_playlist_id: Some(s("37i9dQZF1DXcBWIGoYBM3M")),
        active_audio_source: Some(AudioSource::Archive),
        visual_directives: Some(default_visual_directives()),
        asset_library: None,
        hero: HeroBlock {
            badge: s("The Strategic Infrastructure for Independent Elite"),
            title: s("DMG DISTRIBUTION HOLDINGS"),
            subtitle: s(
                "Architecting the future of independent music through strategic capital, global distribution, and world-class artist management.",
            ),
            image: s("https://images.unsplash.com/photo-1514525253344-f814d0743b17?q=80&w=2000"),
        },
        vision: VisionBlock {
            title: s("The Advantage"),
            paragraphs: strings(&[
                "DMG Distribution Holdings was built on a simple, uncompromising truth: The artist is the ultimate asset.",
                "We bridge the gap between independent spirit and global industrial capacity. We are the guardians of creative legacy.",
            ]),
            image: s("https://images.unsplash.com/photo-1598488035139-bdbb2231ce04?q=80&w=2000"),
        },
        enterprise_sections: vec![EnterpriseSection {
            id: s("es1"),
            title: s("Core Infrastructure"),
            subtitle: s(
                "The essential foundations of the DMG ecosystem, providing global scale to independent talent.",
            ),
            items: vec![
                PortfolioItem {
                    id: s("p1"),
                    name: s("DMG Distributions"),
                    category: s("Infrastructure"),
                    description: s(
                        "Global delivery systems designed for the independent artist. We provide the pipes, you provide the art.",
                    ),
                    image: s("https://images.unsplash.com/photo-1614613535308-eb5fbd3d2c17?q=80&w=2000"),
                    features: strings(&["Global DSP Delivery", "Direct-to-Fan Tech", "Master Preservation"]),
                },
                PortfolioItem {
                    id: s("p2"),
                    name: s("DMG Management"),
                    category: s("Strategy"),
                    description: s(
                        "Elite talent architecture and brand development. We don't just manage careers; we engineer creative dynasties through precision positioning.",
                    ),
                    image: s("https://images.unsplash.com/photo-1557426272-fc759fbb7a8d?q=80&w=2000"),
                    features: strings(&["Brand Engineering", "Global Tour Strategy", "IP Portfolio Management"]),
                },
            ],
        }],
        roster: vec![RosterItem {
            id: s("r1"),
            name: s("DMG Nutso"),
            role: s("Flagship Artist"),
            description: s(
                "Representing the core DNA of DMG. Nutso leverages our global distribution infrastructure to maintain 100% independence.",
            ),
            image: s("https://images.unsplash.com/photo-1493225255756-d9584f8606e9?q=80&w=2000"),
        }],
        newsletter: NewsletterBlock {
            title: s("Strategic Intelligence"),
            subtitle: s(
                "Subscribe to receive quarterly insights on independent distribution architecture and global talent management.",
            ),
            button_text: s("Join Intelligence"),
            image: s("https://images.unsplash.com/photo-1516280440614-37939bbacd81?q=80&w=2000"),
            subscribers: None,
        },
        custom_sections: Vec::<CustomSection>::new(),
        catalog: vec![AudioTrack {
            id: s("t1"),
            title: s("Institutional Anthem"),
            artist: s("DMG Core"),
            url: s("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3"),
            ..AudioTrack::default()
        }],
    }
}

fn default_visual_directives() -> BTreeMap<String, String> {
    [
        ("hero_image", "Urban street style, brutalist concrete, red neon light accent, high-end music executive vibe."),
        ("vision_image", "Studio mixing board, selective red focus, dark industrial theme."),
        (
            "enterpriseSections_0_items_0_image",
            "Music distribution cables, glowing red highlights, cinematic tech aesthetic.",
        ),
        (
            "enterpriseSections_0_items_1_image",
            "Modern loft office, street-style corporate fashion, red accent lighting.",
        ),
        ("roster_0_image", "High-contrast artist portrait, red rim light, urban backdrop."),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}
