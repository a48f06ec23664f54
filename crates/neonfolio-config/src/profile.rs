//! Page content.

use serde::Deserialize;

/// Everything the portfolio page shows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub about: Vec<String>,
    pub skills: Vec<Skill>,
    pub experience: Vec<TimelineEntry>,
    pub stats: Vec<Stat>,
    pub contact: Vec<Contact>,
    /// Commands typed out in the contact terminal.
    pub terminal_commands: Vec<String>,
}

/// A skill with a proficiency bar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Bar fill in percent.
    pub progress: u8,
}

/// One job on the experience timeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineEntry {
    pub period: String,
    pub role: String,
    pub company: String,
}

/// A headline number such as "10+ years".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

/// A way to get in touch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contact {
    pub label: String,
    pub value: String,
}

impl Default for Profile {
    fn default() -> Self {
        let skill = |name: &str, progress| Skill {
            name: name.to_string(),
            progress,
        };
        let stat = |value: &str, label: &str| Stat {
            value: value.to_string(),
            label: label.to_string(),
        };
        let contact = |label: &str, value: &str| Contact {
            label: label.to_string(),
            value: value.to_string(),
        };
        Self {
            name: "Alex Rivera".to_string(),
            headline: "Lead QA Automation Engineer".to_string(),
            about: vec![
                "10+ years building test automation that teams trust.".to_string(),
                "Selenium, C#, Java, Azure DevOps and a soft spot for flaky-test forensics."
                    .to_string(),
            ],
            skills: vec![
                skill("C# .NET", 90),
                skill("Selenium WebDriver", 95),
                skill("Java", 80),
                skill("Azure DevOps", 85),
                skill("CI/CD", 85),
                skill("API Testing", 90),
            ],
            experience: vec![
                TimelineEntry {
                    period: "2021 - now".to_string(),
                    role: "Lead QA Automation Engineer".to_string(),
                    company: "Northwind Systems".to_string(),
                },
                TimelineEntry {
                    period: "2017 - 2021".to_string(),
                    role: "Senior SDET".to_string(),
                    company: "Contoso Labs".to_string(),
                },
                TimelineEntry {
                    period: "2014 - 2017".to_string(),
                    role: "QA Engineer".to_string(),
                    company: "Fabrikam".to_string(),
                },
            ],
            stats: vec![
                stat("10+", "years experience"),
                stat("250", "test suites shipped"),
                stat("40", "pipelines automated"),
            ],
            contact: vec![
                contact("Email", "alex@example.com"),
                contact("GitHub", "github.com/alex-rivera"),
                contact("LinkedIn", "linkedin.com/in/alex-rivera"),
            ],
            terminal_commands: vec![
                "$ whoami".to_string(),
                "$ cat contact.txt".to_string(),
                "$ echo \"let's build something reliable\"".to_string(),
            ],
        }
    }
}
