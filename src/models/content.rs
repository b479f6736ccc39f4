//! Static marketing copy for the sponsorship page

/// A titled paragraph, used for the highlight bullets and the impact list
#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Image {
    pub file: &'static str,
    pub alt: &'static str,
}

impl Image {
    /// Resolve the image against the configured asset host
    pub fn url(&self, asset_base_url: &str) -> String {
        format!("{}/{}", asset_base_url.trim_end_matches('/'), self.file)
    }
}

pub const HERO_TITLE: &str = "Sponsorship";
pub const HERO_TAGLINE: &str = "Partner with us to transform the future of livestock breeding";

pub const WHY_SPONSOR_TITLE: &str = "Why Sponsor Us?";
pub const WHY_SPONSOR_TEXT: &str = "Be a part of the future of livestock breeding by sponsoring \
NextGen Breeders Alliance. Your sponsorship directly supports innovation, training, and research \
in modern livestock farming and feed formulation. By partnering with us, you gain visibility, \
impact, and the opportunity to shape the next generation of breeders worldwide.";

pub const WHY_SPONSOR_HIGHLIGHTS: [Highlight; 3] = [
    Highlight {
        title: "Research Excellence",
        text: "Support cutting-edge research in livestock genetics and breeding technologies.",
    },
    Highlight {
        title: "Training Programs",
        text: "Fund comprehensive education initiatives for farmers across Africa.",
    },
    Highlight {
        title: "Technology Innovation",
        text: "Drive the development of modern farming technologies and practices.",
    },
];

pub const BREEDING_IMAGE: Image = Image {
    file: "breeding-facility.jpg",
    alt: "Livestock breeding research facility",
};

pub const MISSION_TITLE: &str = "Support Our Mission";
pub const MISSION_TEXT: &str = "Your donations help the alliance grow by supporting training \
programs, advanced technology research, feed formulation development, and livestock improvement \
initiatives across Africa. Every contribution makes a meaningful difference in transforming \
agricultural practices and improving farmer livelihoods.";

pub const DONATION_CARD_TITLE: &str = "Make a Donation";
pub const AMOUNT_LABEL: &str = "Donation Amount (₦)";
pub const DONATE_LABEL: &str = "Donate Now";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const PITCH_DECK_LABEL: &str = "Download Pitch Deck";

pub const IMPACT_TITLE: &str = "Your Impact";
pub const IMPACT_ITEMS: [Highlight; 3] = [
    Highlight {
        title: "Training & Education",
        text: "Fund comprehensive training programs that reach thousands of farmers across \
Nigeria and Africa, providing them with modern breeding techniques and sustainable farming practices.",
    },
    Highlight {
        title: "Research & Development",
        text: "Support groundbreaking research in livestock genetics, feed formulation, and \
agricultural technology that drives innovation across the entire industry.",
    },
    Highlight {
        title: "Technology Access",
        text: "Enable the development and deployment of modern farming technologies, making \
advanced livestock breeding techniques accessible to farmers of all scales.",
    },
];

pub const POULTRY_IMAGE: Image = Image {
    file: "poultry-farm.jpg",
    alt: "Modern poultry farming facility",
};
