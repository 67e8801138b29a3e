use chrono::{DateTime, Utc};
use seller_console_domain::{Lead, LeadSource, LeadStatus, Opportunity, Stage};

pub fn at(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().unwrap()
}

pub fn lead(id: &str, name: &str, company: &str, score: u8) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@{}.com", name.to_lowercase(), company.to_lowercase()),
        company: company.to_string(),
        status: LeadStatus::New,
        source: LeadSource::Webform,
        score,
        created_at: at("2024-03-01T09:00:00Z"),
        notes: None,
    }
}

/// Five leads with distinct scores, names and companies.
pub fn seed_leads() -> Vec<Lead> {
    let mut leads = vec![
        lead("1", "Ann", "Acme", 10),
        lead("2", "Bruno", "Globex", 85),
        lead("3", "Carla", "Acme", 55),
        lead("4", "Diego", "Initech", 70),
        lead("5", "Eva", "Umbrella", 25),
    ];
    leads[1].status = LeadStatus::Qualified;
    leads[1].source = LeadSource::Linkedin;
    leads[3].status = LeadStatus::Qualified;
    leads[3].source = LeadSource::Ads;
    leads[4].status = LeadStatus::Contacted;
    leads
}

pub fn opportunity(id: &str, name: &str, value: f64, created_at: &str) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        lead_id: None,
        name: name.to_string(),
        company: None,
        email: None,
        value: Some(value),
        stage: Stage::Prospecting,
        created_at: at(created_at),
        notes: None,
    }
}

pub fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|item| id(item).to_string()).collect()
}
