use crate::config::RoutingLane;
use crate::shared::ids::WorkflowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    Development,
    Git,
    Init,
}

impl CommandCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Git => "git",
            Self::Init => "init",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PromptRole {
    Analyzer,
    Architect,
    Debugger,
    Frontend,
    Optimizer,
    Reviewer,
    Tester,
}

impl PromptRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analyzer => "analyzer",
            Self::Architect => "architect",
            Self::Debugger => "debugger",
            Self::Frontend => "frontend",
            Self::Optimizer => "optimizer",
            Self::Reviewer => "reviewer",
            Self::Tester => "tester",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Analyzer => "Analyzer",
            Self::Architect => "Architect",
            Self::Debugger => "Debugger",
            Self::Frontend => "Frontend Engineer",
            Self::Optimizer => "Optimizer",
            Self::Reviewer => "Reviewer",
            Self::Tester => "Tester",
        }
    }

    pub fn focus(self) -> &'static str {
        match self {
            Self::Analyzer => "Break the problem down, surface hidden constraints and trade-offs, and rank the options with explicit reasoning.",
            Self::Architect => "Design the implementation: module boundaries, data flow, interfaces and the order in which changes should land.",
            Self::Debugger => "Reproduce the failure from the evidence given, form hypotheses, and narrow to a root cause before proposing a fix.",
            Self::Frontend => "Own UI structure, component state, accessibility and styling; keep interactions consistent with the existing design system.",
            Self::Optimizer => "Identify the measurable bottleneck first, then propose changes with expected impact and how to verify it.",
            Self::Reviewer => "Review the change for correctness, security, maintainability and test coverage; flag blocking issues separately from nits.",
            Self::Tester => "Derive test cases from the requirements and edge cases, prefer deterministic tests, and name what each test proves.",
        }
    }
}

/// One role prompt a command relies on, resolved against the models of a
/// routing lane at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBinding {
    pub role: PromptRole,
    pub lane: RoutingLane,
}

const fn bind(role: PromptRole, lane: RoutingLane) -> PromptBinding {
    PromptBinding { role, lane }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDef {
    pub id: &'static str,
    pub description: &'static str,
    pub category: CommandCategory,
    pub objective: &'static str,
    pub prompts: &'static [PromptBinding],
}

use CommandCategory::{Development, Git, Init};
use PromptRole::{Analyzer, Architect, Debugger, Frontend, Optimizer, Reviewer, Tester};

pub const COMMANDS: &[CommandDef] = &[
    CommandDef {
        id: "dev",
        description: "Full six-phase multi-model development workflow",
        category: Development,
        objective: "Research, ideate, plan, implement, optimize and review the requested change, delegating backend work to the backend models and UI work to the frontend models.",
        prompts: &[
            bind(Architect, RoutingLane::Backend),
            bind(Frontend, RoutingLane::Frontend),
            bind(Reviewer, RoutingLane::Review),
        ],
    },
    CommandDef {
        id: "code",
        description: "Multi-model code generation with smart routing",
        category: Development,
        objective: "Classify the request as frontend or backend work, route it to the matching models and merge their proposals into one change.",
        prompts: &[
            bind(Architect, RoutingLane::Backend),
            bind(Frontend, RoutingLane::Frontend),
        ],
    },
    CommandDef {
        id: "debug",
        description: "Multi-model debugging with deep reasoning",
        category: Development,
        objective: "Collect independent root-cause hypotheses from each model, cross-check them against the evidence and converge on one fix.",
        prompts: &[
            bind(Debugger, RoutingLane::Backend),
            bind(Debugger, RoutingLane::Frontend),
        ],
    },
    CommandDef {
        id: "test",
        description: "Multi-model test generation",
        category: Development,
        objective: "Generate tests for the target code, backend tests from the backend models and UI tests from the frontend models.",
        prompts: &[
            bind(Tester, RoutingLane::Backend),
            bind(Tester, RoutingLane::Frontend),
        ],
    },
    CommandDef {
        id: "bugfix",
        description: "Quality-gated bug fix (requires a 90%+ review score)",
        category: Development,
        objective: "Fix the reported bug, then iterate until the review models score the fix at 90% or higher.",
        prompts: &[
            bind(Debugger, RoutingLane::Backend),
            bind(Reviewer, RoutingLane::Review),
        ],
    },
    CommandDef {
        id: "think",
        description: "Deep multi-model analysis",
        category: Development,
        objective: "Analyse the question in depth with every routed model and synthesise a single recommendation.",
        prompts: &[
            bind(Analyzer, RoutingLane::Backend),
            bind(Analyzer, RoutingLane::Frontend),
        ],
    },
    CommandDef {
        id: "optimize",
        description: "Performance optimization",
        category: Development,
        objective: "Profile the target, agree on the dominant bottleneck and apply the optimization with a before/after measurement.",
        prompts: &[
            bind(Optimizer, RoutingLane::Backend),
            bind(Optimizer, RoutingLane::Frontend),
        ],
    },
    CommandDef {
        id: "frontend",
        description: "Frontend task routed to the frontend models",
        category: Development,
        objective: "Implement the UI task with the frontend models as the source of the design and code.",
        prompts: &[bind(Frontend, RoutingLane::Frontend)],
    },
    CommandDef {
        id: "backend",
        description: "Backend task routed to the backend models",
        category: Development,
        objective: "Implement the service, API or data task with the backend models as the source of the design and code.",
        prompts: &[bind(Architect, RoutingLane::Backend)],
    },
    CommandDef {
        id: "review",
        description: "Dual-model code review",
        category: Development,
        objective: "Review the current diff with every review model in parallel and merge the findings by severity.",
        prompts: &[bind(Reviewer, RoutingLane::Review)],
    },
    CommandDef {
        id: "analyze",
        description: "Dual-model technical analysis",
        category: Development,
        objective: "Analyse the codebase area in question with every review model and compare their conclusions.",
        prompts: &[bind(Analyzer, RoutingLane::Review)],
    },
    CommandDef {
        id: "enhance",
        description: "Prompt enhancement",
        category: Development,
        objective: "Rewrite the user's request into a precise, context-rich prompt before any other command runs.",
        prompts: &[],
    },
    CommandDef {
        id: "commit",
        description: "Smart commit with a generated message",
        category: Git,
        objective: "Inspect the staged changes and write a conventional commit message that describes them.",
        prompts: &[],
    },
    CommandDef {
        id: "rollback",
        description: "Interactive rollback",
        category: Git,
        objective: "List recent commits and roll back to the chosen one, confirming before any destructive step.",
        prompts: &[],
    },
    CommandDef {
        id: "clean-branches",
        description: "Clean up merged and stale branches",
        category: Git,
        objective: "Find branches already merged or inactive and delete them after confirmation.",
        prompts: &[],
    },
    CommandDef {
        id: "worktree",
        description: "Git worktree management",
        category: Git,
        objective: "Create, list and remove git worktrees for parallel work on separate branches.",
        prompts: &[],
    },
    CommandDef {
        id: "init",
        description: "Initialize project AI context",
        category: Init,
        objective: "Scan the repository and write a CLAUDE.md that documents its structure, conventions and commands.",
        prompts: &[],
    },
];

pub fn find(id: &str) -> Option<&'static CommandDef> {
    COMMANDS.iter().find(|def| def.id == id)
}

pub fn all_command_ids() -> Vec<&'static str> {
    COMMANDS.iter().map(|def| def.id).collect()
}

pub fn all_workflow_ids() -> Vec<WorkflowId> {
    COMMANDS
        .iter()
        .filter_map(|def| WorkflowId::parse(def.id).ok())
        .collect()
}
