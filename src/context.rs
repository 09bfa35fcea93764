// src/context.rs

use crate::constants::{MAX_KEY_TECH, PRIVATE_PROJECT_PLACEHOLDER, PROMPT_SEPARATOR};
use crate::profile::{Education, Profile};
use once_cell::sync::Lazy;
use regex::Regex;

static KEY_TECH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(Laravel|React|PHP|MySQL|Golang|PostgreSQL|JavaScript|Bootstrap|Tailwind)\b")
        .expect("key tech pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    pub short_description: String,
    pub tech_stack: String,
    /// Public URL, or the private-project placeholder.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceSummary {
    pub company: String,
    pub role: String,
    pub time_span: String,
    pub key_tech: Vec<String>,
}

/// Condensed view of a [`Profile`], rebuilt for every prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub projects: Vec<ProjectSummary>,
    pub experiences: Vec<ExperienceSummary>,
    pub education: Vec<Education>,
}

impl ProfileSummary {
    pub fn from_profile(profile: &Profile) -> Self {
        let projects = profile
            .projects
            .iter()
            .map(|p| ProjectSummary {
                name: p.name.clone(),
                short_description: p.short_description.clone(),
                tech_stack: p.tech_stack.join(", "),
                url: p
                    .url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or(PRIVATE_PROJECT_PLACEHOLDER)
                    .to_string(),
            })
            .collect();

        let experiences = profile
            .experiences
            .iter()
            .map(|e| ExperienceSummary {
                company: e.company.clone(),
                role: e.role.clone(),
                time_span: e.time_span.clone(),
                key_tech: extract_key_tech(&e.description.join(" ")),
            })
            .collect();

        Self {
            projects,
            experiences,
            education: profile.education.clone(),
        }
    }
}

/// First few known technology names in `text`, in order of appearance.
pub fn extract_key_tech(text: &str) -> Vec<String> {
    KEY_TECH
        .find_iter(text)
        .take(MAX_KEY_TECH)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Builds the prompt sent to the model: persona, guidelines, profile facts,
/// then the visitor's question.
pub struct ContextBuilder<'a> {
    profile: &'a Profile,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self { profile }
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary::from_profile(self.profile)
    }

    /// Everything before the separator. Depends only on the profile.
    pub fn prefix(&self) -> String {
        let owner = &self.profile.owner;
        let name = or_placeholder(&owner.name, "Not provided");
        let email = or_placeholder(&owner.email, "Not provided");

        let mut prompt = format!(
            "You are {}, an AI assistant for a portfolio website. Here's information about the portfolio owner:\n\n",
            self.profile.display_name()
        );
        prompt.push_str(&format!("Name: {}\nEmail: {}\n\n", name, email));

        prompt.push_str("RESPONSE FORMATTING GUIDELINES:\n");
        prompt.push_str("- Use bullet points with * for lists (e.g., * **Company Name** - Description)\n");
        prompt.push_str("- Use **bold text** for important information like company names, project titles, technologies\n");
        prompt.push_str("- Keep responses well-structured and scannable\n");
        prompt.push_str("- Use line breaks to separate different sections\n");
        prompt.push_str("- When listing experiences or projects, format as: * **Title/Company** - Brief description\n\n");

        prompt.push_str("CONVERSATION GUIDELINES:\n");
        prompt.push_str("- Be friendly, professional, and helpful\n");
        prompt.push_str("- Answer questions about skills, projects, experience, and background\n");
        prompt.push_str(&format!(
            "- If asked about contact, direct them to the contact section or provide email: {}\n",
            email
        ));
        prompt.push_str("- Keep responses concise but informative (aim for 2-4 sentences per point)\n");
        prompt.push_str("- Use emojis occasionally to make conversations engaging (1-2 per response max)\n");
        prompt.push_str("- If you don't know something specific, be honest and suggest they contact directly\n");
        prompt.push_str("- When discussing technical skills, mention specific technologies used\n");
        prompt.push_str("- For project inquiries, highlight the most relevant projects based on the question\n\n");

        prompt.push_str("PERSONALITY:\n");
        prompt.push_str("- Professional but approachable\n");
        prompt.push_str("- Enthusiastic about technology and development\n");
        prompt.push_str("- Helpful and informative\n");
        prompt.push_str(&format!("- Represents {}'s expertise confidently\n\n", name));

        self.push_facts(&mut prompt);
        prompt
    }

    /// `prefix + separator + query`. The query is passed through untouched.
    pub fn build_prompt(&self, query: &str) -> String {
        let mut prompt = self.prefix();
        prompt.push_str(PROMPT_SEPARATOR);
        prompt.push_str(query);
        prompt
    }

    fn push_facts(&self, prompt: &mut String) {
        let summary = self.summary();

        prompt.push_str(&format!(
            "SKILLS: {}\n\n",
            self.profile.owner.skills.join(", ")
        ));

        prompt.push_str("PROJECTS:\n");
        for p in &summary.projects {
            prompt.push_str(&format!(
                "- {}: {} (Tech: {}) [{}]\n",
                p.name, p.short_description, p.tech_stack, p.url
            ));
        }

        prompt.push_str("\nEXPERIENCE:\n");
        for e in &summary.experiences {
            prompt.push_str(&format!("- {} at {} ({})", e.role, e.company, e.time_span));
            if !e.key_tech.is_empty() {
                prompt.push_str(&format!(" [Tech: {}]", e.key_tech.join(", ")));
            }
            prompt.push('\n');
        }

        prompt.push_str("\nEDUCATION:\n");
        for ed in &summary.education {
            prompt.push_str(&format!(
                "- {} at {} ({})\n",
                ed.major, ed.institution, ed.time_span
            ));
        }
    }
}

fn or_placeholder<'s>(value: &'s str, placeholder: &'s str) -> &'s str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
