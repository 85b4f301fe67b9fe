//! The built-in sample catalogue: a six-module store-setup course plus
//! recorded and upcoming webinars.

use chrono::NaiveDate;
use trailhead_core::catalog::{
    Lesson, LiveWebinar, Module, RecordedWebinar, Resource, Speaker, VideoRef,
};
use trailhead_core::Catalog;

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap_or_default()
}

/// Builds the full sample catalogue.
pub fn sample_catalog() -> Catalog {
    Catalog::new(modules(), recorded_webinars(), live_webinars())
}

fn modules() -> Vec<Module> {
    vec![
        Module::new(
            1,
            "Getting Started",
            vec![
                Lesson::new("1-1", "Creating your store account", "5 min", VideoRef::youtube("gs-account"))
                    .with_resources(vec![Resource::new("Account setup checklist", "https://trailhead.example/res/account-checklist.pdf")]),
                Lesson::new("1-2", "A complete tour of the admin panel", "8 min", VideoRef::youtube("gs-tour")),
                Lesson::new("1-3", "Essential store settings", "10 min", VideoRef::youtube("gs-settings"))
                    .with_resources(vec![Resource::new("Settings guide", "https://trailhead.example/res/settings-guide.pdf")]),
            ],
        ),
        Module::new(
            2,
            "Product Listings",
            vec![
                Lesson::new("2-1", "Anatomy of a product page that sells", "7 min", VideoRef::youtube("pl-anatomy")),
                Lesson::new("2-2", "Adding your first products", "12 min", VideoRef::youtube("pl-first"))
                    .with_resources(vec![
                        Resource::new("Product listing checklist", "https://trailhead.example/res/listing-checklist.pdf"),
                        Resource::new("Persuasive description template", "https://trailhead.example/res/description-template.docx"),
                    ]),
                Lesson::new("2-3", "Product photos that convert", "15 min", VideoRef::youtube("pl-photos"))
                    .with_resources(vec![
                        Resource::new("Product photography guide", "https://trailhead.example/res/photo-guide.pdf"),
                        Resource::new("Photo checklist", "https://trailhead.example/res/photo-checklist.pdf"),
                    ]),
                Lesson::new("2-4", "Variants, stock, and organization", "10 min", VideoRef::youtube("pl-variants"))
                    .with_resources(vec![Resource::new("Inventory tracking spreadsheet", "https://trailhead.example/res/inventory.xlsx")]),
            ],
        ),
        Module::new(
            3,
            "Payments and Shipping",
            vec![
                Lesson::new("3-1", "Choosing the right payment methods", "10 min", VideoRef::youtube("ps-payments"))
                    .with_resources(vec![Resource::new("Payment gateway comparison", "https://trailhead.example/res/gateway-comparison.pdf")]),
                Lesson::new("3-2", "Setting up the built-in payment gateway", "8 min", VideoRef::youtube("ps-gateway")),
                Lesson::new("3-3", "Shipping options that work", "12 min", VideoRef::youtube("ps-shipping"))
                    .with_resources(vec![Resource::new("Carrier guide", "https://trailhead.example/res/carrier-guide.pdf")]),
                Lesson::new("3-4", "Shipping calculators and free shipping", "6 min", VideoRef::youtube("ps-calculator"))
                    .with_resources(vec![Resource::new("Shipping cost spreadsheet", "https://trailhead.example/res/shipping-costs.xlsx")]),
            ],
        ),
        Module::new(
            4,
            "Branding and Design",
            vec![
                Lesson::new("4-1", "Picking the perfect theme", "8 min", VideoRef::youtube("bd-theme")),
                Lesson::new("4-2", "Design that converts: customizing with Canva", "15 min", VideoRef::youtube("bd-canva"))
                    .with_resources(vec![
                        Resource::new("Exclusive Canva templates", "https://trailhead.example/res/canva-templates.zip"),
                        Resource::new("Colors and fonts guide", "https://trailhead.example/res/brand-guide.pdf"),
                    ]),
                Lesson::new("4-3", "Banners and highlights that sell", "12 min", VideoRef::youtube("bd-banners"))
                    .with_resources(vec![Resource::new("Editable banner pack", "https://trailhead.example/res/banner-pack.zip")]),
                Lesson::new("4-4", "Essential store pages", "7 min", VideoRef::youtube("bd-pages"))
                    .with_resources(vec![Resource::new("Page templates", "https://trailhead.example/res/page-templates.zip")]),
            ],
        ),
        Module::new(
            5,
            "First Sales",
            vec![
                Lesson::new("5-1", "Organic promotion strategies", "15 min", VideoRef::youtube("fs-organic"))
                    .with_resources(vec![Resource::new("Content calendar", "https://trailhead.example/res/content-calendar.xlsx")]),
                Lesson::new("5-2", "Marketing automation: selling on autopilot", "18 min", VideoRef::youtube("fs-automation"))
                    .with_resources(vec![
                        Resource::new("Email templates", "https://trailhead.example/res/email-templates.zip"),
                        Resource::new("Automation flow diagram", "https://trailhead.example/res/automation-flow.pdf"),
                    ]),
                Lesson::new("5-3", "Your first paid social campaign", "20 min", VideoRef::youtube("fs-ads"))
                    .with_resources(vec![
                        Resource::new("Paid ads guide", "https://trailhead.example/res/ads-guide.pdf"),
                        Resource::new("Campaign checklist", "https://trailhead.example/res/campaign-checklist.pdf"),
                    ]),
                Lesson::new("5-4", "Strategic coupons and promotions", "8 min", VideoRef::youtube("fs-coupons")),
            ],
        ),
        Module::new(
            6,
            "Store Launch",
            vec![
                Lesson::new("6-1", "The complete pre-launch checklist", "10 min", VideoRef::youtube("sl-checklist"))
                    .with_resources(vec![Resource::new("Launch checklist (PDF)", "https://trailhead.example/res/launch-checklist.pdf")]),
                Lesson::new("6-2", "Testing your store as a customer", "8 min", VideoRef::youtube("sl-testing")),
                Lesson::new("6-3", "Going live with your domain", "5 min", VideoRef::youtube("sl-domain")),
                Lesson::new("6-4", "Commerce trends and next steps", "15 min", VideoRef::youtube("sl-trends"))
                    .with_resources(vec![
                        Resource::new("2026 commerce report", "https://trailhead.example/res/commerce-report.pdf"),
                        Resource::new("Growth roadmap", "https://trailhead.example/res/growth-roadmap.pdf"),
                    ]),
            ],
        ),
    ]
}

fn recorded_webinars() -> Vec<RecordedWebinar> {
    vec![
        RecordedWebinar {
            id: "webinar-1".to_string(),
            title: "Commerce 2025: what the data reveals".to_string(),
            description: "A deep dive into e-commerce trends backed by exclusive platform data.".to_string(),
            duration: "58 min".to_string(),
            date: "15 Jan 2026".to_string(),
            video: VideoRef::youtube("wb-commerce-2025"),
            resources: vec![
                Resource::new("Commerce 2025 report (PDF)", "https://trailhead.example/res/commerce-2025.pdf"),
                Resource::new("Presentation slides", "https://trailhead.example/res/commerce-2025-slides.pdf"),
            ],
        },
        RecordedWebinar {
            id: "webinar-2".to_string(),
            title: "How Vegpet grew sales with automation".to_string(),
            description: "A real success story: automated emails and abandoned-cart recovery.".to_string(),
            duration: "45 min".to_string(),
            date: "08 Jan 2026".to_string(),
            video: VideoRef::youtube("wb-vegpet"),
            resources: vec![
                Resource::new("Vegpet email templates", "https://trailhead.example/res/vegpet-emails.zip"),
                Resource::new("Automation flow", "https://trailhead.example/res/vegpet-flow.pdf"),
            ],
        },
        RecordedWebinar {
            id: "webinar-3".to_string(),
            title: "D2C Fashion Talks: selling fashion online".to_string(),
            description: "Strategies the biggest fashion brands use to sell direct to consumer.".to_string(),
            duration: "52 min".to_string(),
            date: "18 Dec 2025".to_string(),
            video: VideoRef::youtube("wb-fashion"),
            resources: vec![Resource::new("D2C fashion guide", "https://trailhead.example/res/d2c-fashion.pdf")],
        },
        RecordedWebinar {
            id: "webinar-4".to_string(),
            title: "Design that converts: a Canva workshop".to_string(),
            description: "A hands-on design workshop for creating materials that sell.".to_string(),
            duration: "41 min".to_string(),
            date: "11 Dec 2025".to_string(),
            video: VideoRef::youtube("wb-canva"),
            resources: vec![
                Resource::new("Exclusive Canva templates", "https://trailhead.example/res/canva-templates.zip"),
                Resource::new("E-commerce design guide", "https://trailhead.example/res/design-guide.pdf"),
            ],
        },
        RecordedWebinar {
            id: "webinar-5".to_string(),
            title: "Paid ads from zero: your first campaign".to_string(),
            description: "A complete walkthrough of creating social ads that convert.".to_string(),
            duration: "55 min".to_string(),
            date: "04 Dec 2025".to_string(),
            video: VideoRef::youtube("wb-ads"),
            resources: vec![
                Resource::new("Campaign checklist", "https://trailhead.example/res/campaign-checklist.pdf"),
                Resource::new("Audience targeting guide", "https://trailhead.example/res/audience-guide.pdf"),
            ],
        },
        RecordedWebinar {
            id: "webinar-6".to_string(),
            title: "Black Friday: getting your store ready to sell".to_string(),
            description: "Strategies, promotions, and a complete checklist for the biggest date in e-commerce.".to_string(),
            duration: "48 min".to_string(),
            date: "20 Nov 2025".to_string(),
            video: VideoRef::youtube("wb-blackfriday"),
            resources: vec![
                Resource::new("Black Friday checklist", "https://trailhead.example/res/bf-checklist.pdf"),
                Resource::new("Promotions spreadsheet", "https://trailhead.example/res/bf-promotions.xlsx"),
            ],
        },
    ]
}

fn live_webinars() -> Vec<LiveWebinar> {
    vec![
        LiveWebinar {
            id: 1,
            date: day(2026, 1, 23),
            time: "15:00".to_string(),
            title: "Design that converts: customizing your store with Canva".to_string(),
            description: "Practical design techniques for banners, logos, and materials that lift sales.".to_string(),
            speaker: Speaker {
                name: "Marina Costa".to_string(),
                role: "Designer @ Trailhead".to_string(),
                avatar_url: "https://trailhead.example/avatars/marina.jpg".to_string(),
            },
            join_url: "https://live.trailhead.example/design-that-converts".to_string(),
            spots_left: 127,
        },
        LiveWebinar {
            id: 2,
            date: day(2026, 1, 30),
            time: "15:00".to_string(),
            title: "Marketing automation: sell more on autopilot".to_string(),
            description: "The Vegpet case: growing sales with automated emails and cart recovery.".to_string(),
            speaker: Speaker {
                name: "Ricardo Almeida".to_string(),
                role: "Growth @ Trailhead".to_string(),
                avatar_url: "https://trailhead.example/avatars/ricardo.jpg".to_string(),
            },
            join_url: "https://live.trailhead.example/marketing-automation".to_string(),
            spots_left: 284,
        },
        LiveWebinar {
            id: 3,
            date: day(2026, 2, 6),
            time: "15:00".to_string(),
            title: "D2C or marketplace? Selling across channels".to_string(),
            description: "What the big brands teach about balancing sales channels.".to_string(),
            speaker: Speaker {
                name: "Juliana Ferreira".to_string(),
                role: "Head of Commerce @ Trailhead".to_string(),
                avatar_url: "https://trailhead.example/avatars/juliana.jpg".to_string(),
            },
            join_url: "https://live.trailhead.example/d2c-or-marketplace".to_string(),
            spots_left: 342,
        },
        LiveWebinar {
            id: 4,
            date: day(2026, 2, 13),
            time: "15:00".to_string(),
            title: "Commerce 2026: trends and marketplace data".to_string(),
            description: "An exclusive look at platform data and what to expect this year.".to_string(),
            speaker: Speaker {
                name: "Felipe Santos".to_string(),
                role: "CEO @ Trailhead".to_string(),
                avatar_url: "https://trailhead.example/avatars/felipe.jpg".to_string(),
            },
            join_url: "https://live.trailhead.example/commerce-2026".to_string(),
            spots_left: 456,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_shape() {
        let catalog = sample_catalog();
        assert_eq!(catalog.modules().len(), 6);
        assert_eq!(catalog.lesson_count(), 23);
        assert_eq!(catalog.recorded_webinars().len(), 6);
        assert_eq!(catalog.live_webinars().len(), 4);
    }

    #[test]
    fn test_sample_lesson_ids_are_unique_and_resolvable() {
        let catalog = sample_catalog();
        let mut seen = std::collections::HashSet::new();
        for module in catalog.modules() {
            for lesson in &module.lessons {
                assert!(seen.insert(lesson.id.clone()), "duplicate id {}", lesson.id);
                assert!(catalog.lesson(&lesson.id).is_ok());
            }
        }
    }

    #[test]
    fn test_every_webinar_video_resolves() {
        let catalog = sample_catalog();
        for webinar in catalog.recorded_webinars() {
            assert!(catalog.recorded_webinar(&webinar.id).is_ok());
        }
    }
}
