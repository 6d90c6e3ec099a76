use super::{Decision, GuidanceExample, KnownError, QuickStart, ToolGuidance, Workflow};

const NONE: &[&str] = &[];

pub(super) static TOOL_GUIDANCE: &[ToolGuidance] = &[
    // File system
    ToolGuidance {
        tool: "Read",
        best_practices: &[
            "Always use absolute paths, not relative paths",
            "Use offset/limit for large files to avoid memory issues",
            "Check file existence with LS before reading if unsure",
            "Use line numbers in output to reference specific code locations",
        ],
        common_patterns: &[
            "Read before Edit: Always read a file before editing to understand its content",
            "Incremental reading: Use offset/limit for files > 2000 lines",
            "Error handling: Check if file exists before reading",
        ],
        examples: &[
            GuidanceExample {
                description: "Read entire file",
                code: r#"{"name": "Read", "arguments": {"file_path": "/path/to/file.txt"}}"#,
            },
            GuidanceExample {
                description: "Read specific lines",
                code: r#"{"name": "Read", "arguments": {"file_path": "/path/to/file.txt", "offset": 100, "limit": 50}}"#,
            },
        ],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "Write",
        best_practices: &[
            "Creates parent directories automatically",
            "Always overwrites existing files - use Edit for modifications",
            "Use absolute paths only",
            "Prefer editing existing files over creating new ones",
        ],
        common_patterns: &[
            "Read → Edit pattern: Prefer editing existing files",
            "Backup before overwrite: Read file first if you need to preserve content",
            "Configuration files: Good for creating new config files",
        ],
        examples: &[GuidanceExample {
            description: "Create new file",
            code: r#"{"name": "Write", "arguments": {"file_path": "/path/to/new_file.txt", "content": "Hello World"}}"#,
        }],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "Edit",
        best_practices: &[
            "old_string must match exactly (including whitespace)",
            "Use replace_all: true for global replacements",
            "Make old_string unique to avoid ambiguity",
            "Always Read the file first to understand context",
        ],
        common_patterns: &[
            "Variable renaming: Use replace_all: true",
            "Single occurrence: Default behavior finds unique matches",
            "Context matching: Include surrounding lines for uniqueness",
        ],
        examples: &[
            GuidanceExample {
                description: "Single replacement",
                code: r#"{"name": "Edit", "arguments": {"file_path": "/path/to/file.txt", "old_string": "old text", "new_string": "new text"}}"#,
            },
            GuidanceExample {
                description: "Global replacement",
                code: r#"{"name": "Edit", "arguments": {"file_path": "/path/to/file.txt", "old_string": "oldVar", "new_string": "newVar", "replace_all": true}}"#,
            },
        ],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "MultiEdit",
        best_practices: &[
            "All edits are atomic - if one fails, none are applied",
            "Edits are applied sequentially - order matters",
            "Use for bulk refactoring operations",
            "Test with single Edit first for complex changes",
        ],
        common_patterns: &[
            "Refactoring: Multiple related changes in one operation",
            "Import updates: Change multiple import statements",
            "Bulk renaming: Multiple variable renames",
        ],
        examples: &[GuidanceExample {
            description: "Multiple related edits",
            code: r#"{"name": "MultiEdit", "arguments": {"file_path": "/path/to/file.txt", "edits": [{"old_string": "old1", "new_string": "new1"}, {"old_string": "old2", "new_string": "new2"}]}}"#,
        }],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "Glob",
        best_practices: &[
            "Use specific patterns to avoid too many results",
            "Results are sorted by modification time (newest first)",
            "Cross-platform - works on Windows/Linux/Mac",
            "Use for file discovery before batch operations",
        ],
        common_patterns: &[
            "Language-specific files: '**/*.{js,ts,jsx,tsx}'",
            "Configuration files: '**/config.*'",
            "Test files: '**/*.test.*' or '**/*_test.*'",
        ],
        examples: &[
            GuidanceExample {
                description: "Find TypeScript files",
                code: r#"{"name": "Glob", "arguments": {"pattern": "**/*.ts", "path": "/project/src"}}"#,
            },
            GuidanceExample {
                description: "Find config files",
                code: r#"{"name": "Glob", "arguments": {"pattern": "**/config.{json,yaml,yml}"}}"#,
            },
        ],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "Grep",
        best_practices: &[
            "Use regex patterns for flexible matching",
            "Combine with include parameter for file type filtering",
            "Results sorted by modification time",
            "Use for finding specific code patterns",
        ],
        common_patterns: &[
            r"Function definitions: 'function\s+\w+'",
            "Import statements: 'import.*from'",
            r"Error handling: 'try\s*{'",
            r"Class definitions: 'class\s+\w+'",
        ],
        examples: &[
            GuidanceExample {
                description: "Find function definitions",
                code: r#"{"name": "Grep", "arguments": {"pattern": "function\\s+\\w+", "include": "*.js"}}"#,
            },
            GuidanceExample {
                description: "Find imports",
                code: r#"{"name": "Grep", "arguments": {"pattern": "import.*from", "include": "*.{js,ts}"}}"#,
            },
        ],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "LS",
        best_practices: &[
            "Use absolute paths only",
            "Shows file sizes and directory indicators",
            "Use ignore patterns to filter results",
            "Good for understanding directory structure",
        ],
        common_patterns: &[
            "Project exploration: Start with root directory",
            "File verification: Check if files exist",
            "Size checking: Identify large files",
        ],
        examples: &[
            GuidanceExample {
                description: "List directory",
                code: r#"{"name": "LS", "arguments": {"path": "/project/src"}}"#,
            },
            GuidanceExample {
                description: "List with ignore",
                code: r#"{"name": "LS", "arguments": {"path": "/project", "ignore": ["node_modules", ".git"]}}"#,
            },
        ],
        security_notes: NONE,
        limitations: NONE,
    },
    // System
    ToolGuidance {
        tool: "Bash",
        best_practices: &[
            "Always include a clear description",
            "Use timeout for long-running commands",
            "Quote paths with spaces properly",
            "Combine commands with && or ; for efficiency",
        ],
        common_patterns: &[
            "Testing: Run tests before committing changes",
            "Building: Compile/build projects",
            "Git operations: Status, add, commit, push",
            "Package management: npm install, pip install",
        ],
        examples: &[
            GuidanceExample {
                description: "Run tests",
                code: r#"{"name": "Bash", "arguments": {"command": "npm test", "description": "Run project tests"}}"#,
            },
            GuidanceExample {
                description: "Git status",
                code: r#"{"name": "Bash", "arguments": {"command": "git status && git diff", "description": "Check git status and changes"}}"#,
            },
        ],
        security_notes: &[
            "Never execute untrusted commands",
            "Be careful with file permissions",
            "Validate paths before using in commands",
            "Use timeouts to prevent hanging",
        ],
        limitations: NONE,
    },
    // Task management
    ToolGuidance {
        tool: "TodoWrite",
        best_practices: &[
            "Use for complex multi-step tasks",
            "Mark tasks as in_progress before starting",
            "Complete tasks immediately after finishing",
            "Use priority levels appropriately",
        ],
        common_patterns: &[
            "Planning: Break down large tasks into smaller steps",
            "Progress tracking: Update status as you work",
            "Debugging: Track what you've tried",
        ],
        examples: &[GuidanceExample {
            description: "Create task list",
            code: r#"{"name": "TodoWrite", "arguments": {"todos": [{"id": "1", "content": "Implement feature X", "status": "pending", "priority": "high"}]}}"#,
        }],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "Task",
        best_practices: &[
            "Use for complex autonomous operations",
            "Provide detailed prompts",
            "Current implementation is placeholder",
            "Good for delegating search/analysis tasks",
        ],
        common_patterns: NONE,
        examples: &[],
        security_notes: NONE,
        limitations: &[
            "Placeholder implementation in current version",
            "Would need autonomous agent framework for full functionality",
            "Use for planning what would be automated",
        ],
    },
    // Web
    ToolGuidance {
        tool: "WebFetch",
        best_practices: &[
            "Handles JSON and HTML content differently",
            "Content is truncated if too large",
            "HTTP URLs upgraded to HTTPS automatically",
            "Use specific prompts for content extraction",
        ],
        common_patterns: &[
            "API testing: Fetch JSON endpoints",
            "Documentation: Extract content from web pages",
            "Data gathering: Collect information from URLs",
        ],
        examples: &[
            GuidanceExample {
                description: "Fetch JSON API",
                code: r#"{"name": "WebFetch", "arguments": {"url": "https://api.example.com/data", "prompt": "Extract the JSON data"}}"#,
            },
            GuidanceExample {
                description: "Fetch HTML content",
                code: r#"{"name": "WebFetch", "arguments": {"url": "https://example.com", "prompt": "Extract the main content"}}"#,
            },
        ],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "WebSearch",
        best_practices: &[
            "Current implementation is simplified",
            "Use domain filtering for better results",
            "Expect limited functionality",
            "Good for planning what to search for",
        ],
        common_patterns: NONE,
        examples: &[],
        security_notes: NONE,
        limitations: &[
            "Simplified implementation",
            "May return empty results",
            "Requires proper search API integration for production",
        ],
    },
    // Notebooks
    ToolGuidance {
        tool: "NotebookRead",
        best_practices: &[
            "Auto-generates cell IDs if missing",
            "Shows all cell types (code, markdown)",
            "Displays outputs and execution counts",
            "Use cell_id parameter for specific cells",
        ],
        common_patterns: &[
            "Analysis: Understand notebook structure",
            "Debugging: Check cell contents and outputs",
            "Validation: Verify notebook format",
        ],
        examples: &[],
        security_notes: NONE,
        limitations: NONE,
    },
    ToolGuidance {
        tool: "NotebookEdit",
        best_practices: &[
            "Always specify cell_type for insert mode",
            "Use proper cell IDs (auto-generated if missing)",
            "Three modes: replace, insert, delete",
            "Maintains notebook structure integrity",
        ],
        common_patterns: &[
            "Code updates: Replace cell content",
            "Documentation: Insert markdown cells",
            "Cleanup: Delete unnecessary cells",
        ],
        examples: &[
            GuidanceExample {
                description: "Replace cell",
                code: r#"{"name": "NotebookEdit", "arguments": {"notebook_path": "/path/to/notebook.ipynb", "cell_id": "cell-1", "new_source": "print('Hello')", "edit_mode": "replace"}}"#,
            },
            GuidanceExample {
                description: "Insert cell",
                code: r##"{"name": "NotebookEdit", "arguments": {"notebook_path": "/path/to/notebook.ipynb", "new_source": "# Title", "edit_mode": "insert", "cell_type": "markdown"}}"##,
            },
        ],
        security_notes: NONE,
        limitations: NONE,
    },
];

pub(super) static WORKFLOWS: &[Workflow] = &[
    Workflow {
        name: "File Analysis",
        example: "Understanding a new codebase",
        steps: &[
            "1. Use LS to explore directory structure",
            "2. Use Glob to find relevant files",
            "3. Use Read to examine file contents",
            "4. Use Grep to search for specific patterns",
        ],
    },
    Workflow {
        name: "Code Refactoring",
        example: "Renaming variables or functions",
        steps: &[
            "1. Use TodoWrite to plan refactoring tasks",
            "2. Use Grep to find all occurrences",
            "3. Use Read to understand context",
            "4. Use Edit or MultiEdit to make changes",
            "5. Use Bash to run tests",
        ],
    },
    Workflow {
        name: "Bug Investigation",
        example: "Debugging runtime errors",
        steps: &[
            "1. Use Grep to find error messages or patterns",
            "2. Use Read to examine problematic files",
            "3. Use Bash to reproduce the issue",
            "4. Use Edit to implement fixes",
            "5. Use Bash to verify the fix",
        ],
    },
    Workflow {
        name: "Project Setup",
        example: "Setting up a new development environment",
        steps: &[
            "1. Use LS to understand project structure",
            "2. Use Read to check package.json/requirements",
            "3. Use Bash to install dependencies",
            "4. Use Bash to run build/test commands",
            "5. Use Write to create configuration files",
        ],
    },
];

pub(super) static DECISIONS: &[Decision] = &[
    Decision {
        topic: "When to use Read vs Grep",
        branches: &[
            (
                "Use Read when",
                &[
                    "You know the specific file to examine",
                    "You need to see the full context",
                    "You want to understand file structure",
                ],
            ),
            (
                "Use Grep when",
                &[
                    "You're searching across multiple files",
                    "You're looking for specific patterns",
                    "You don't know which files contain the content",
                ],
            ),
        ],
    },
    Decision {
        topic: "When to use Edit vs MultiEdit",
        branches: &[
            (
                "Use Edit when",
                &[
                    "Making single, simple changes",
                    "Testing changes before bulk operations",
                    "Unsure about the scope of changes",
                ],
            ),
            (
                "Use MultiEdit when",
                &[
                    "Making multiple related changes",
                    "Confident about all changes needed",
                    "Performing bulk refactoring",
                ],
            ),
        ],
    },
    Decision {
        topic: "When to use Write vs Edit",
        branches: &[
            (
                "Use Write when",
                &[
                    "Creating new files",
                    "Completely replacing file contents",
                    "File doesn't exist yet",
                ],
            ),
            (
                "Use Edit when",
                &[
                    "Modifying existing files",
                    "Preserving most of the content",
                    "Making targeted changes",
                ],
            ),
        ],
    },
];

pub(super) static KNOWN_ERRORS: &[KnownError] = &[
    KnownError {
        name: "File not found",
        pattern: "Error: File not found at /path/to/file",
        solutions: &[
            "Use LS to check if file exists",
            "Verify the path is correct and absolute",
            "Check if file was moved or deleted",
        ],
    },
    KnownError {
        name: "old_string not found",
        pattern: "old_string not found in file",
        solutions: &[
            "Use Read to see actual file contents",
            "Check for exact whitespace matching",
            "Use Grep to find similar patterns",
        ],
    },
    KnownError {
        name: "Multiple occurrences",
        pattern: "old_string appears X times in file",
        solutions: &[
            "Use replace_all: true for global replacement",
            "Add more context to make old_string unique",
            "Use MultiEdit for different replacements",
        ],
    },
    KnownError {
        name: "Permission denied",
        pattern: "Permission denied",
        solutions: &[
            "Check file permissions with Bash: ls -la",
            "Use Bash to change permissions if needed",
            "Verify you have write access to the directory",
        ],
    },
];

pub(super) static QUICK_STARTS: &[QuickStart] = &[
    QuickStart {
        task_type: "file_operations",
        title: "File Operations Quick Start",
        steps: &[
            "1. **Explore**: Use LS to see directory structure",
            "2. **Find**: Use Glob to find files by pattern",
            "3. **Search**: Use Grep to find content across files",
            "4. **Read**: Use Read to examine specific files",
            "5. **Modify**: Use Edit for single changes, MultiEdit for multiple",
            "6. **Create**: Use Write only for new files",
        ],
        tips: &[
            "Always use absolute paths",
            "Read files before editing them",
            "Use Grep to find what you need to change",
        ],
    },
    QuickStart {
        task_type: "code_analysis",
        title: "Code Analysis Quick Start",
        steps: &[
            "1. **Structure**: Use LS to understand project layout",
            "2. **Dependencies**: Read package.json/requirements files",
            "3. **Find patterns**: Use Grep to find functions, classes, imports",
            "4. **Examine code**: Use Read to understand implementation",
            "5. **Test**: Use Bash to run tests and builds",
        ],
        tips: &[
            "Start with configuration files",
            "Look for main entry points",
            "Check test files for usage examples",
        ],
    },
    QuickStart {
        task_type: "debugging",
        title: "Debugging Quick Start",
        steps: &[
            "1. **Find errors**: Use Grep to search for error messages",
            "2. **Trace code**: Use Read to examine problem areas",
            "3. **Check logs**: Use Bash to view log files",
            "4. **Test changes**: Use Edit to try fixes",
            "5. **Verify**: Use Bash to run tests",
        ],
        tips: &[
            "Use TodoWrite to track what you've tried",
            "Make small changes and test each one",
            "Use GetErrorHelp for common error patterns",
        ],
    },
    QuickStart {
        task_type: "project_setup",
        title: "Project Setup Quick Start",
        steps: &[
            "1. **Explore**: Use LS to see project structure",
            "2. **Dependencies**: Read package.json/requirements",
            "3. **Install**: Use Bash to install dependencies",
            "4. **Configure**: Use Write to create config files",
            "5. **Test**: Use Bash to run build/test commands",
        ],
        tips: &[
            "Check README files first",
            "Look for setup scripts",
            "Verify all dependencies are installed",
        ],
    },
    QuickStart {
        task_type: "general",
        title: "General Quick Start",
        steps: &[
            "1. **Plan**: Use TodoWrite for complex tasks",
            "2. **Explore**: Use LS and Glob to understand the codebase",
            "3. **Search**: Use Grep to find relevant code",
            "4. **Read**: Use Read to understand context",
            "5. **Modify**: Use Edit/MultiEdit to make changes",
            "6. **Test**: Use Bash to verify changes",
            "7. **Iterate**: Repeat as needed",
        ],
        tips: &[
            "Use GetToolGuidance for specific tool help",
            "Use GetWorkflowGuidance for complex workflows",
            "Use GetErrorHelp when things go wrong",
        ],
    },
];
