use rand::Rng;
use std::ops::RangeInclusive;

/// Vendors quoted for every hotel, in display and tie-break order.
pub const BOOKING_SITES: [&str; 4] = ["Booking.com", "Expedia", "Hotels.com", "Direct Hotel"];

const MIN_BASE_PRICE: u32 = 150;
const MAX_BASE_PRICE: u32 = 450;
const RATING_PRICE_FACTOR: f64 = 50.0;
const VENDOR_SPREAD: RangeInclusive<f64> = 0.95..=1.05;
const PLACEHOLDER_IMAGE_BASE: &str = "https://placehold.co/150x150/f0f0f0/333?text=";

#[derive(Debug, Clone, PartialEq)]
pub struct HotelCatalogEntry {
    pub name: &'static str,
    pub city: &'static str,
    pub rating: f64,
    pub amenities: &'static [&'static str],
}

pub static CATALOG: &[HotelCatalogEntry] = &[
    HotelCatalogEntry {
        name: "Grand View Towers",
        city: "Dubai",
        rating: 4.5,
        amenities: &["Pool", "Free Wi-Fi", "Gym"],
    },
    HotelCatalogEntry {
        name: "City Center Inn",
        city: "Dubai",
        rating: 3.8,
        amenities: &["Free Wi-Fi", "Free breakfast"],
    },
    HotelCatalogEntry {
        name: "Luxury Resort Oasis",
        city: "Abu Dhabi",
        rating: 5.0,
        amenities: &["Private beach", "Spa", "Pool"],
    },
    HotelCatalogEntry {
        name: "The Budget Stay",
        city: "Abu Dhabi",
        rating: 3.0,
        amenities: &["Parking", "Free Wi-Fi"],
    },
    HotelCatalogEntry {
        name: "Nile Panorama Hotel",
        city: "Cairo",
        rating: 4.2,
        amenities: &["River view", "Restaurant"],
    },
    HotelCatalogEntry {
        name: "Historical Boutique",
        city: "Cairo",
        rating: 4.0,
        amenities: &["Terrace", "Free breakfast"],
    },
    HotelCatalogEntry {
        name: "Palm Beach Hotel",
        city: "Dubai",
        rating: 4.7,
        amenities: &["Beach access", "Pool", "Spa"],
    },
    HotelCatalogEntry {
        name: "Desert Sands Villa",
        city: "Abu Dhabi",
        rating: 4.1,
        amenities: &["Gym", "Free Wi-Fi"],
    },
    HotelCatalogEntry {
        name: "Four Seasons Hotel Nile Plaza",
        city: "Cairo",
        rating: 4.9,
        amenities: &["Luxury spa", "Nile view", "Rooftop pool"],
    },
    HotelCatalogEntry {
        name: "Marriott Mena House",
        city: "Giza",
        rating: 4.8,
        amenities: &["Pyramids view", "Gardens", "Fine dining"],
    },
    HotelCatalogEntry {
        name: "Sofitel Legend Old Cataract",
        city: "Aswan",
        rating: 5.0,
        amenities: &["Historic", "Nile view", "Pool", "Suite service"],
    },
    HotelCatalogEntry {
        name: "Rixos Premium Seagate",
        city: "Sharm El Sheikh",
        rating: 4.6,
        amenities: &["All inclusive", "Aqua park", "Beach access"],
    },
    HotelCatalogEntry {
        name: "Hilton Luxor Resort & Spa",
        city: "Luxor",
        rating: 4.4,
        amenities: &["Spa", "River view", "Infinity pool"],
    },
    HotelCatalogEntry {
        name: "The Oberoi Sahl Hasheesh",
        city: "Hurghada",
        rating: 4.8,
        amenities: &["Luxury suites", "Private beach", "Diving"],
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub base_price: u32,
    /// Vendor prices in `BOOKING_SITES` order
    pub prices: Vec<(&'static str, u32)>,
    pub cheapest_price: u32,
    pub cheapest_vendor: &'static str,
}

/// Inclusive range the base nightly price is drawn from for a given rating.
pub fn base_price_range(rating: f64) -> RangeInclusive<u32> {
    let factor = (rating * RATING_PRICE_FACTOR).floor().max(0.0) as u32;
    (MIN_BASE_PRICE + factor)..=(MAX_BASE_PRICE + factor)
}

/// Draw a base price for `rating`, then an independent +/-5% quote per vendor.
pub fn generate_quote<R: Rng>(rating: f64, rng: &mut R) -> PriceQuote {
    let base_price = rng.random_range(base_price_range(rating));

    let prices: Vec<(&'static str, u32)> = BOOKING_SITES
        .iter()
        .map(|site| {
            let variation = rng.random_range(VENDOR_SPREAD);
            (*site, (base_price as f64 * variation).round() as u32)
        })
        .collect();

    let (cheapest_vendor, cheapest_price) = cheapest(&prices);

    PriceQuote {
        base_price,
        prices,
        cheapest_price,
        cheapest_vendor,
    }
}

/// First vendor (in list order) with the minimum price.
fn cheapest(prices: &[(&'static str, u32)]) -> (&'static str, u32) {
    let mut best = ("N/A", u32::MAX);
    for &(vendor, price) in prices {
        if price < best.1 {
            best = (vendor, price);
        }
    }
    best
}

pub fn placeholder_image_url(city: &str) -> String {
    let label = city.split_whitespace().collect::<Vec<_>>().join("+");
    format!("{}{}", PLACEHOLDER_IMAGE_BASE, urlencoding::encode(&label))
}

#[derive(Debug, Clone)]
pub struct HotelListing {
    pub entry: &'static HotelCatalogEntry,
    pub quote: PriceQuote,
    pub image_url: String,
}

impl HotelListing {
    pub fn name(&self) -> &'static str {
        self.entry.name
    }

    pub fn city(&self) -> &'static str {
        self.entry.city
    }
}

/// Priced catalog, generated once per process and stable afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: Vec<HotelListing>,
}

impl Catalog {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self::from_entries(CATALOG, rng)
    }

    pub fn from_entries<R: Rng>(entries: &'static [HotelCatalogEntry], rng: &mut R) -> Self {
        let listings = entries
            .iter()
            .map(|entry| HotelListing {
                entry,
                quote: generate_quote(entry.rating, rng),
                image_url: placeholder_image_url(entry.city),
            })
            .collect();

        tracing::debug!(hotels = entries.len(), "Generated simulated prices");
        Self { listings }
    }

    pub fn listings(&self) -> &[HotelListing] {
        &self.listings
    }

    /// Hotels in `city` (case-insensitive) rated at least `min_rating`, cheapest first.
    pub fn search_and_compare(&self, city: &str, min_rating: f64) -> Vec<&HotelListing> {
        let city = city.trim().to_lowercase();
        let mut matches: Vec<&HotelListing> = self
            .listings
            .iter()
            .filter(|l| l.entry.city.to_lowercase() == city && l.entry.rating >= min_rating)
            .collect();
        matches.sort_by_key(|l| l.quote.cheapest_price);
        matches
    }

    pub fn find(&self, name: &str) -> Option<&HotelListing> {
        let name = name.trim();
        self.listings
            .iter()
            .find(|l| l.entry.name.eq_ignore_ascii_case(name))
    }

    pub fn cities(&self) -> Vec<&'static str> {
        let mut cities: Vec<&'static str> = Vec::new();
        for listing in &self.listings {
            if !cities.contains(&listing.entry.city) {
                cities.push(listing.entry.city);
            }
        }
        cities
    }
}
