//! Template-based sentence generator.
//!
//! Every template holds exactly one `{slot}` placeholder which is filled from
//! that slot's vocabulary. All randomness comes from the caller's `Rng`, so a
//! seeded generator always yields the same sequence.

use rand::prelude::*;

pub const EXTRA_SENTENCE_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Time,
    Topic,
    Effect,
    Domain,
    Industry,
    DatabaseType,
    WorkloadType,
    LanguageAspect,
    ThreatType,
    EnvironmentalBenefit,
    ProductCategory,
    Field,
    DeviceFeature,
    MarketFactor,
    Innovation,
}

impl Slot {
    pub fn placeholder(self) -> &'static str {
        match self {
            Slot::Time => "{time}",
            Slot::Topic => "{topic}",
            Slot::Effect => "{effect}",
            Slot::Domain => "{domain}",
            Slot::Industry => "{industry}",
            Slot::DatabaseType => "{database_type}",
            Slot::WorkloadType => "{workload_type}",
            Slot::LanguageAspect => "{language_aspect}",
            Slot::ThreatType => "{threat_type}",
            Slot::EnvironmentalBenefit => "{environmental_benefit}",
            Slot::ProductCategory => "{product_category}",
            Slot::Field => "{field}",
            Slot::DeviceFeature => "{device_feature}",
            Slot::MarketFactor => "{market_factor}",
            Slot::Innovation => "{innovation}",
        }
    }

    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Slot::Time => &["morning", "afternoon", "evening", "midnight", "dawn", "dusk"],
            Slot::Topic => &["techniques", "algorithms", "methodologies", "frameworks", "approaches"],
            Slot::Effect => &["droughts", "floods", "temperature variations", "seasonal shifts", "extreme weather"],
            Slot::Domain => &["microservices", "containerization", "cloud environments", "distributed systems"],
            Slot::Industry => &["finance", "retail", "manufacturing", "transportation", "education"],
            Slot::DatabaseType => &["relational", "NoSQL", "graph", "time-series", "columnar"],
            Slot::WorkloadType => &["web", "mobile", "analytics", "streaming", "batch processing"],
            Slot::LanguageAspect => &["text", "speech", "communication", "dialogue", "content"],
            Slot::ThreatType => &["malware", "phishing", "ransomware", "social engineering", "insider"],
            Slot::EnvironmentalBenefit => &["sustainability", "carbon reduction", "clean air", "energy independence"],
            Slot::ProductCategory => &["books", "electronics", "clothing", "home goods", "software"],
            Slot::Field => &["biology", "physics", "chemistry", "psychology", "astronomy"],
            Slot::DeviceFeature => &["performance", "battery life", "connectivity", "storage", "processing power"],
            Slot::MarketFactor => &["geopolitical events", "inflation rates", "technological disruptions", "consumer behavior"],
            Slot::Innovation => &["virtual reality", "interactive whiteboards", "online collaboration", "adaptive learning"],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub text: &'static str,
    pub slot: Slot,
}

const fn t(text: &'static str, slot: Slot) -> Template { Template { text, slot } }

pub const TEMPLATES: [Template; 15] = [
    t("The quick brown fox jumps over the lazy dog in the forest during {time}.", Slot::Time),
    t("Machine learning models require large datasets and computational resources for training {topic}.", Slot::Topic),
    t("Climate change affects weather patterns across different regions, causing {effect}.", Slot::Effect),
    t("Modern software development practices include continuous integration and deployment in {domain}.", Slot::Domain),
    t("Artificial intelligence applications are transforming industries like {industry} and healthcare.", Slot::Industry),
    t("Database optimization techniques help improve query performance for {database_type} systems.", Slot::DatabaseType),
    t("Cloud computing platforms provide scalable infrastructure for {workload_type} applications.", Slot::WorkloadType),
    t("Natural language processing enables computers to understand and generate human {language_aspect}.", Slot::LanguageAspect),
    t("Cybersecurity measures protect sensitive data from various types of {threat_type} attacks.", Slot::ThreatType),
    t("Renewable energy sources like solar and wind power contribute to {environmental_benefit}.", Slot::EnvironmentalBenefit),
    t("E-commerce platforms utilize recommendation systems to suggest relevant {product_category} to users.", Slot::ProductCategory),
    t("Scientific research in {field} requires collaboration between multiple institutions and experts.", Slot::Field),
    t("Mobile applications must be optimized for different screen sizes and {device_feature}.", Slot::DeviceFeature),
    t("Financial markets are influenced by economic indicators and {market_factor}.", Slot::MarketFactor),
    t("Educational technology transforms traditional learning methods through {innovation}.", Slot::Innovation),
];

pub const EXTRA_SENTENCES: [&str; 5] = [
    " This is particularly important for modern applications.",
    " Research shows significant improvements in efficiency.",
    " Industry experts recommend this approach for scalability.",
    " The implementation requires careful planning and execution.",
    " Users report positive experiences with this methodology.",
];

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// One sentence of at most `max_len` characters.
pub fn generate_text<R: Rng + ?Sized>(rng: &mut R, max_len: usize) -> String {
    let template = pick(rng, &TEMPLATES);
    let filler = *pick(rng, template.slot.vocabulary());
    let mut text = template.text.replace(template.slot.placeholder(), filler);
    if rng.gen_bool(EXTRA_SENTENCE_PROBABILITY) {
        text.push_str(*pick(rng, &EXTRA_SENTENCES));
    }
    limit_length(text, max_len)
}

/// Cuts `text` at the last space within the first `max_len` characters and
/// terminates it with a period. A run with no space is hard-cut one short of
/// the limit so the period still fits.
pub fn limit_length(text: String, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text;
    }
    if max_len == 0 {
        return String::new();
    }
    let head = &text[..byte_offset(&text, max_len)];
    let keep = match head.rfind(' ') {
        Some(space) => space,
        None => byte_offset(head, max_len - 1),
    };
    format!("{}.", &head[..keep])
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}

/// Owns the random source for a run.
pub struct TextGenerator {
    rng: StdRng,
    max_len: usize,
}

impl TextGenerator {
    pub fn new(max_len: usize, seed: Option<u64>) -> Self {
        let rng: StdRng = match seed { Some(s) => SeedableRng::seed_from_u64(s), None => StdRng::from_entropy() };
        Self { rng, max_len }
    }

    pub fn next_text(&mut self) -> String {
        generate_text(&mut self.rng, self.max_len)
    }

    pub fn batch(&mut self, n: usize) -> Vec<String> {
        (0..n).map(|_| self.next_text()).collect()
    }
}
