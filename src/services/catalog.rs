/// Command catalog
/// Static, read-only content: the command table, the `life` consent texts,
/// project descriptions and the environment boot script

use std::sync::OnceLock;

/// Command names in registration order. Autocomplete walks this list.
pub const AVAILABLE_COMMANDS: &[&str] = &[
    "system --init",
    "whoami",
    "contacts",
    "skills",
    "projects",
    "experience",
    "education",
    "life",
    "help",
    "clear",
];

pub const BOOT_COMMAND: &str = "system --init";

pub const LIFE_PROMPT_LINE: &str =
    "Before we continue, please read the terms and conditions. Continue? Y/n";
pub const TERMS_MARKER: &str = "terms and conditions";
pub const TERMS_QUIT_TOKEN: &str = ":q";

pub const NOT_FOUND_HINT: &str = "Type 'help' to list available commands.";
pub const CONSENT_VIEW_TERMS_FIRST: &str =
    "Please view the terms and conditions first (click the link), then answer Y/n.";
pub const CONSENT_ANSWER_YN: &str = "Please answer with Y or n.";
pub const CONSENT_ABORTED: &str = "Aborted.";
pub const OPENING_LIFE: &str = "Opening /life ...";
pub const LIFE_PATH: &str = "/life";
pub const TERMS_CLOSED: &str = "Terms closed. Continue? Y/n";

pub const SECTION_MARKER: &str = "★";
pub const POSITION_PREFIX: &str = "o-------->";
pub const CURRENT_PERIOD: &str = "Nov 2024 - Current";
pub const NDA_PROJECT_TITLE: &str = "Private project (NDA)";

pub fn not_found_line(command: &str) -> String {
    format!("Command not found: {}", command)
}

pub fn download_line(file_name: &str) -> String {
    format!("Downloading {} ...", file_name)
}

const SYSTEM_INIT: &[&str] = &[
    "System initialized...",
    "",
    "Welcome to the Dev/Ops Environment.",
    "",
    "User: DevOps Architect",
    "Status: Online",
    "Kernel: v5.15.0-generic",
    "",
    "Available commands:",
    "  → whoami",
    "  → contacts",
    "  → skills",
    "  → projects",
    "  → experience",
    "  → education",
    "  → life",
    "  → clear",
    "",
    "Tip: type 'help' to list commands.",
];

const WHOAMI: &[&str] = &[
    "🔧 Python Automation | DevOps Engineer | Fullstack Developer (React & Next.js)",
    "",
    "I'm a software engineer passionate about automation, system reliability, and cross-functional problem-solving.",
    "With a foundation in backend scripting and a strong grasp of DevOps culture and tools, I specialize in:",
    "",
    "★ Python Automation & DevOps",
    "  • Designed and deployed scalable CI/CD pipelines using Jenkins, Docker, Groovy, and Git",
    "  • Automated OS provisioning and upgrades across hundreds of servers with Python/Bash, Redfish API, and Airflow",
    "  • Implemented logging, backup, and monitoring solutions that improved operational stability and resolution times",
    "  • Worked hands-on with Linux kernel tuning, IPMI tooling, and image building (Cubic)",
    "",
    "★ Cloud & Infrastructure",
    "  • Built infrastructure and automation on both AWS and GCP (Cloud Run, Cloud Build, IAM, S3)",
    "  • Employed Ansible and Airflow for orchestrated deployments and task scheduling",
    "",
    "★ Fullstack Development",
    "  • Built and maintained front-end and internal tools using React, Next.js, and TanStack Query",
    "  • Developed backend APIs with Node.js, Prisma, and PostgreSQL",
    "",
    "★ Team & Delivery Focus",
    "  • Comfortable in Agile teams: sprint planning, documentation, cross-departmental communication",
    "  • Known for debugging under pressure and bridging Dev and Ops teams",
    "",
];

const CONTACTS: &[&str] = &[
    "  - GitHub: https://github.com/ag913331",
    "  - LinkedIn: www.linkedin.com/in/alexandro-georgiev-711b631b5",
    "  - Email: georgievalexandro@gmail.com",
];

const SKILLS: &[&str] = &[
    "Core:",
    "  - TypeScript / Node.js, React, Next.js",
    "  - API design (REST), auth, data modeling",
    "",
    "DevOps:",
    "  - Linux, Bash, networking fundamentals",
    "  - Docker, containers, reverse proxies",
    "  - CI/CD (GitHub Actions), IaC (Terraform)",
    "  - Monitoring (Prometheus/Grafana), logging",
];

const PROJECTS: &[&str] = &[
    "Featured projects:",
    "  - Homelab Platform — Show project description",
    "  - Fleet Provisioner — Show project description",
    "  - Source: https://github.com/ag913331",
    "",
    "Private (NDA): Details",
];

const EXPERIENCE: &[&str] = &[
    "★ Experience",
    "",
    "o--------> DevOps Engineer",
    "| period: Nov 2024 - Current",
    "| focus: CI/CD pipelines, cloud automation, observability",
    "",
    "o--------> Python Automation Engineer",
    "| period: Mar 2022 - Oct 2024",
    "| focus: OS provisioning, Redfish API, Airflow orchestration",
    "",
    "o--------> Fullstack Developer",
    "| period: Jun 2020 - Feb 2022",
    "| focus: React, Next.js, Node.js APIs",
];

const EDUCATION: &[&str] = &[
    "★ Education",
    "{",
    "  \"institution\": \"Technical University of Sofia\",",
    "  \"degree\": \"Master of Engineering, Computer Systems\",",
    "  \"degree\": \"Bachelor of Engineering, Computer Systems\",",
    "  \"degree\": \"Professional Certificate, Cloud Engineering\"",
    "}",
    "",
    "★ Certifications",
    "  - AWS Certified Cloud Practitioner",
    "  | credential: https://www.credly.com/badges/aws-cloud-practitioner",
    "  - Google Cloud Associate Cloud Engineer",
    "  | credential: www.credential.net/gcp-ace",
];

const LIFE: &[&str] = &[
    "Outside of work:",
    "  - Homelab tinkering, self-hosting, automation",
    "  - Linux customization, CLI tooling",
    "  - Learning systems design + security",
];

const NOTES: &[&str] = &[
    "Notes:",
    "  - Commands are case-sensitive.",
    "  - Use ↑ / ↓ to cycle history.",
    "  - Use Ctrl+L to clear.",
];

/// Table entries other than `help`, which is derived.
const TABLE: &[(&str, &[&str])] = &[
    ("system --init", SYSTEM_INIT),
    ("whoami", WHOAMI),
    ("contacts", CONTACTS),
    ("skills", SKILLS),
    ("projects", PROJECTS),
    ("experience", EXPERIENCE),
    ("education", EDUCATION),
    ("life", LIFE),
];

fn help_lines() -> &'static [&'static str] {
    static HELP: OnceLock<Vec<&'static str>> = OnceLock::new();
    HELP.get_or_init(|| {
        static ENTRIES: OnceLock<Vec<String>> = OnceLock::new();
        let entries = ENTRIES.get_or_init(|| {
            AVAILABLE_COMMANDS
                .iter()
                .map(|name| format!("  - {}", name))
                .collect()
        });

        let mut lines = vec!["Commands:"];
        lines.extend(entries.iter().map(String::as_str));
        lines.push("");
        lines.extend_from_slice(NOTES);
        lines
    })
}

/// Look a command up by its exact name.
pub fn lookup(name: &str) -> Option<&'static [&'static str]> {
    if name == "help" {
        return Some(help_lines());
    }
    TABLE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, lines)| *lines)
}

/// First registered command that extends `query`, if it is not `query` itself.
pub fn complete(query: &str) -> Option<&'static str> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    AVAILABLE_COMMANDS
        .iter()
        .find(|name| name.starts_with(query))
        .copied()
        .filter(|name| *name != query)
}

pub const TERMS_TEXT: &[&str] = &[
    "TERMS AND CONDITIONS",
    "~",
    "1. The /life page contains personal content: photos, notes and stories.",
    "2. Pictures and text shown there must not be downloaded or redistributed",
    "   without permission.",
    "3. Be kind. This is somebody's life, not a dataset.",
    "~",
    "By answering Y you confirm that you have read and accept these terms.",
    "~",
    "Type :q and press Enter to close this file.",
];

const PRIVATE_PROJECT_DESCRIPTIONS: &[(&str, &[&str])] = &[
    (
        "Homelab Platform",
        &[
            "Homelab Platform",
            "  Self-hosted services on Proxmox with Terraform-provisioned VMs,",
            "  Ansible configuration and a Prometheus/Grafana monitoring stack.",
        ],
    ),
    (
        "Fleet Provisioner",
        &[
            "Fleet Provisioner",
            "  Python service that drives Redfish APIs to reinstall and upgrade",
            "  bare-metal servers in batches, scheduled through Airflow DAGs.",
        ],
    ),
    (
        NDA_PROJECT_TITLE,
        &[
            "Private project (NDA)",
            "  Internal deployment tooling for a hosting provider.",
            "  Details are covered by a non-disclosure agreement.",
        ],
    ),
];

pub fn project_description(title: &str) -> Option<&'static [&'static str]> {
    PRIVATE_PROJECT_DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == title)
        .map(|(_, lines)| *lines)
}

/// Environment boot script as (delay ms, text, muted), before scaling.
pub const ENVIRONMENT_BOOT: &[(u64, &str, bool)] = &[
    (100, "Welcome! We're getting your environment ready. It will take a few seconds...", false),
    (500, "", false),
    (450, "$ docker build -t portfolio:latest .", false),
    (220, "[+] Building 0.1s (1/9) FINISHED", false),
    (220, " => [internal] load build definition from Dockerfile", true),
    (260, " => [internal] load .dockerignore", true),
    (260, " => [internal] load metadata for docker.io/library/node:20-alpine", true),
    (320, " => [1/5] FROM docker.io/library/node:20-alpine", true),
    (420, " => [2/5] WORKDIR /app", true),
    (420, " => [3/5] COPY package*.json ./", true),
    (520, " => [4/5] RUN npm ci", true),
    (520, " => [5/5] COPY . .", true),
    (420, " => exporting to image", true),
    (300, " => => writing image sha256:9a5c...d00d", true),
    (300, " => => naming to portfolio:latest", true),
    (500, "", false),
    (450, "$ docker run --rm -p 3000:3000 portfolio:latest", false),
    (260, "ready - started server on 0.0.0.0:3000, url: http://localhost:3000", true),
    (260, "info  - Compiled successfully", true),
    (500, "", false),
    (450, "$ deploy --target=prod --strategy=blue-green", false),
    (300, "deploy: uploading artifacts...", true),
    (350, "deploy: provisioning runtime...", true),
    (450, "deploy: warming up...", true),
    (450, "deploy: switching traffic...", true),
    (450, "deploy: done ✅", true),
    (600, "", false),
    (450, "Starting terminal...", false),
];
