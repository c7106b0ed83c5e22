//! Built-in stage catalogs
//!
//! Canned simulated-agent scripts. Labels and detail lines are display
//! copy; the sequencing logic treats them as opaque.

use crate::stage::{Stage, StageCatalog};

/// Look up a built-in catalog by name
#[must_use]
pub fn by_name(name: &str) -> Option<StageCatalog> {
    match name {
        "agents" => Some(agent_execution()),
        "agents-compact" => Some(agent_execution_compact()),
        "generation" => Some(generation_steps()),
        "components" => Some(component_actions()),
        _ => None,
    }
}

/// Names accepted by [`by_name`]
pub const BUILTIN_NAMES: &[&str] = &["agents", "agents-compact", "generation", "components"];

/// Detailed agent execution script: five specialized agents, four detail
/// lines each, 800-1200 ms dwell per step.
#[must_use]
pub fn agent_execution() -> StageCatalog {
    let stages = vec![
        Stage::new("parsing", "Context Parser Agent")
            .with_description("Processing topic complexity and user background")
            .with_items([
                "Extracting key concepts from \"Autonomous Agents\"",
                "Analyzing complexity level requirements",
                "Mapping prerequisite knowledge gaps",
                "Determining optimal learning sequence",
            ])
            .with_dwell(800, 1200),
        Stage::new("knowledge", "Knowledge Base Agent")
            .with_description("Accessing curated educational databases")
            .with_items([
                "Querying 50,000+ educational resources",
                "Cross-referencing industry best practices",
                "Validating content accuracy and relevance",
                "Selecting peer-reviewed case studies",
            ])
            .with_dwell(800, 1200),
        Stage::new("orchestrator", "Agent Orchestrator")
            .with_description("Activating specialized learning agents")
            .with_items([
                "Initializing Content Generation Agent",
                "Activating Assessment Design Agent",
                "Starting Code Environment Agent",
                "Synchronizing Progress Tracking Agent",
            ])
            .with_dwell(800, 1200),
        Stage::new("architect", "Learning Architect Agent")
            .with_description("Creating optimal learning progression")
            .with_items([
                "Calculating optimal module duration (15-30 min)",
                "Sequencing concepts for maximum retention",
                "Designing interactive coding challenges",
                "Creating adaptive assessment questions",
            ])
            .with_dwell(800, 1200),
        Stage::new("personalizer", "Personalization Agent")
            .with_description("Tailoring experience to user preferences")
            .with_items([
                "Adapting language complexity to user level",
                "Selecting relevant industry examples",
                "Customizing prerequisite recommendations",
                "Generating personalized practice scenarios",
            ])
            .with_dwell(800, 1200),
    ];
    StageCatalog::new(stages).expect("built-in catalog ids are unique")
}

/// Compact variant of the agent execution script, with shorter copy and a
/// 600-900 ms dwell budget.
#[must_use]
pub fn agent_execution_compact() -> StageCatalog {
    let stages = vec![
        Stage::new("parsing", "Context Parser")
            .with_description("Analyzing learning context")
            .with_items([
                "Extracting key concepts from topic",
                "Analyzing complexity requirements",
                "Mapping prerequisite gaps",
                "Determining learning sequence",
            ])
            .with_dwell(600, 900),
        Stage::new("knowledge", "Knowledge Base")
            .with_description("Consulting expert resources")
            .with_items([
                "Querying educational databases",
                "Cross-referencing best practices",
                "Validating content accuracy",
                "Selecting case studies",
            ])
            .with_dwell(600, 900),
        Stage::new("orchestrator", "Agent Orchestrator")
            .with_description("Coordinating learning agents")
            .with_items([
                "Initializing Content Agent",
                "Activating Assessment Agent",
                "Starting Code Environment",
                "Synchronizing Progress Tracker",
            ])
            .with_dwell(600, 900),
        Stage::new("architect", "Learning Architect")
            .with_description("Designing structure")
            .with_items([
                "Calculating module duration",
                "Sequencing concepts",
                "Designing challenges",
                "Creating assessments",
            ])
            .with_dwell(600, 900),
        Stage::new("personalizer", "Personalizer")
            .with_description("Customizing delivery")
            .with_items([
                "Adapting language complexity",
                "Selecting industry examples",
                "Customizing prerequisites",
                "Generating scenarios",
            ])
            .with_dwell(600, 900),
    ];
    StageCatalog::new(stages).expect("built-in catalog ids are unique")
}

/// Coarse generation pipeline: four stages with fixed per-stage budgets and
/// no detail items. Pairs well with the percentage ticker.
#[must_use]
pub fn generation_steps() -> StageCatalog {
    let stages = vec![
        Stage::new("requirements", "Analyzing Learning Requirements")
            .with_description("Processing your topic and experience level")
            .with_dwell(800, 800),
        Stage::new("knowledge-base", "Consulting Knowledge Base")
            .with_description("Accessing curated learning resources")
            .with_dwell(600, 600),
        Stage::new("agent-network", "Coordinating Agent Network")
            .with_description("Activating specialized learning agents")
            .with_dwell(700, 700),
        Stage::new("modules", "Generating Structured Modules")
            .with_description("Creating personalized 15-30 min modules")
            .with_dwell(900, 900),
    ];
    StageCatalog::new(stages).expect("built-in catalog ids are unique")
}

/// Component generation script: one stage per produced component, each
/// dwelling 1200-2000 ms. Meant to run behind a thinking phase.
#[must_use]
pub fn component_actions() -> StageCatalog {
    let actions = [
        (
            "agent-fundamentals",
            "AutonomousAgentFundamentals.tsx",
            "Interactive concept module with visual explanations",
        ),
        (
            "communication-case",
            "MultiAgentCommunicationCase.tsx",
            "Real-world case study with step-by-step analysis",
        ),
        (
            "coding-environment",
            "AgentCodingEnvironment.tsx",
            "Browser-based coding lab with live preview",
        ),
        (
            "architecture-video",
            "AgentArchitectureVideo.tsx",
            "Interactive video player with timestamps",
        ),
        (
            "validation-quiz",
            "KnowledgeValidationQuiz.tsx",
            "Adaptive MCQ system with instant feedback",
        ),
        (
            "path-progress",
            "LearningPathProgress.tsx",
            "Updating progress tracking for new modules",
        ),
        (
            "recommendations",
            "PersonalizedRecommendations.tsx",
            "AI-powered next steps based on performance",
        ),
    ];
    let stages = actions
        .into_iter()
        .map(|(id, file, description)| {
            Stage::new(id, file)
                .with_description(description)
                .with_dwell(1200, 2000)
        })
        .collect();
    StageCatalog::new(stages).expect("built-in catalog ids are unique")
}
