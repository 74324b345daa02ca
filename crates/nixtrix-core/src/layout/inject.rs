//! Idempotent layout template injection
//!
//! The engine rewrites layout template text so a newly added unit is
//! imported and rendered. It never parses the template into a tree;
//! it recognizes a small set of literal tokens (script zone delimiters,
//! slot placeholders, the `$props()` destructuring) via targeted substring
//! scanning, and passes every byte outside its edit windows through
//! unmodified. All strategies detect prior insertion, so re-running a
//! strategy on its own output is a no-op.

use crate::catalog::UnitKind;
use std::ops::Range;

const SCRIPT_OPEN: &str = "<script>";
const SCRIPT_CLOSE: &str = "</script>";
const SLOT_PLACEHOLDER: &str = "<slot />";
const RENDER_CHILDREN_PLACEHOLDER: &str = "{@render children()}";
const PROPS_CALL: &str = "$props()";
const MARKER_END: &str = "<!-- nixtrix:end -->";

/// Sentinels marking a runes-style script; only such scripts get the
/// children-prop rewrite
const REACTIVE_SENTINELS: &[&str] = &["$props()", "$state", "$derived"];

/// How the layout template should be wired up for a new unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InjectStrategy {
    /// Edit the template directly: import into the script zone, render
    /// next to the slot placeholder
    #[default]
    AutoEdit,
    /// Insert a self-contained, sentinel-delimited helper block
    MarkerBlock,
    /// No edit; print instructions for the operator to apply by hand
    ManualOnly,
    /// No edit, no instructions
    Skip,
}

/// Result of one sub-edit (import or render)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Inserted,
    AlreadyPresent,
    Skipped,
}

/// Outcome of an injection: the updated text plus what happened to each
/// sub-edit
#[derive(Debug, Clone)]
pub struct InjectReport {
    pub text: String,
    pub import: EditOutcome,
    pub render: EditOutcome,
}

impl InjectReport {
    fn unchanged(template: &str) -> Self {
        Self {
            text: template.to_string(),
            import: EditOutcome::Skipped,
            render: EditOutcome::Skipped,
        }
    }

    /// True when the template text differs from the input
    pub fn changed(&self) -> bool {
        self.import == EditOutcome::Inserted || self.render == EditOutcome::Inserted
    }
}

/// The import statement and render tag derived from a unit
///
/// All strategies derive their edits from this one computation, so the
/// auto-edit, the marker block, and the manual instructions always agree.
/// Binding names are not checked for uniqueness: two catalog names that
/// Pascal-case to the same identifier will produce colliding imports.
#[derive(Debug, Clone)]
pub struct ImportBinding {
    binding_name: String,
    import_path: String,
}

impl ImportBinding {
    pub fn new(name: &str, kind: UnitKind) -> Self {
        Self {
            binding_name: pascal_case(name),
            import_path: kind.import_path(name),
        }
    }

    pub fn binding_name(&self) -> &str {
        &self.binding_name
    }

    /// The exact import line inserted into the script zone
    pub fn import_statement(&self) -> String {
        format!(
            "import {} from '{}';",
            self.binding_name, self.import_path
        )
    }

    /// The self-closing render tag inserted into the markup zone
    pub fn render_directive(&self) -> String {
        format!("<{} />", self.binding_name)
    }
}

/// Derive a PascalCase binding name from a kebab-case unit name
pub fn pascal_case(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Produce the updated template text for a unit under the given strategy
///
/// Total over any text input: strategies that have nothing to do return the
/// input unchanged with informational outcomes rather than failing.
pub fn inject(
    template: &str,
    name: &str,
    kind: UnitKind,
    strategy: InjectStrategy,
) -> InjectReport {
    match strategy {
        InjectStrategy::AutoEdit => auto_edit(template, &ImportBinding::new(name, kind)),
        InjectStrategy::MarkerBlock => {
            marker_block(template, name, &ImportBinding::new(name, kind))
        }
        InjectStrategy::ManualOnly | InjectStrategy::Skip => InjectReport::unchanged(template),
    }
}

/// Instruction text for the manual strategy
///
/// Pure: shows the same import statement and render tag the editing
/// strategies would have inserted, without touching the template.
pub fn manual_instructions(name: &str, kind: UnitKind) -> String {
    let binding = ImportBinding::new(name, kind);
    format!(
        "=== Manual Setup for {} ===\n\
         Add to your +layout.svelte:\n\
         \x20 <script>\n\
         \x20   {}\n\
         \x20 </script>\n\
         \x20 {}\n\
         ================================",
        name,
        binding.import_statement(),
        binding.render_directive()
    )
}

fn auto_edit(template: &str, binding: &ImportBinding) -> InjectReport {
    let import_stmt = binding.import_statement();
    let directive = binding.render_directive();

    // The two sub-edits are independent: an import can exist without a
    // render and vice versa, and each gates on its own literal.
    let (mut text, import) = if template.contains(&import_stmt) {
        (template.to_string(), EditOutcome::AlreadyPresent)
    } else {
        (insert_import(template, &import_stmt), EditOutcome::Inserted)
    };

    let render = if text.contains(&directive) {
        EditOutcome::AlreadyPresent
    } else {
        text = insert_render(&text, &directive);
        EditOutcome::Inserted
    };

    InjectReport {
        text,
        import,
        render,
    }
}

/// Add the import line to the script zone, creating the zone if absent
fn insert_import(template: &str, import_stmt: &str) -> String {
    match find_script_zone(template) {
        Some(zone) => {
            let body = &template[zone.body.clone()];
            let body = rewrite_props_children(body).unwrap_or_else(|| body.to_string());
            format!(
                "{}{}\n{}\n\t{}\n{}{}",
                &template[..zone.start],
                SCRIPT_OPEN,
                body.trim(),
                import_stmt,
                SCRIPT_CLOSE,
                &template[zone.end..]
            )
        }
        None => format!(
            "{}\n\t{}\n{}\n\n{}",
            SCRIPT_OPEN, import_stmt, SCRIPT_CLOSE, template
        ),
    }
}

/// Place the render tag before the first slot-like placeholder, preserving
/// the placeholder; append at the end when the template has none
fn insert_render(text: &str, directive: &str) -> String {
    let anchor = text
        .find(SLOT_PLACEHOLDER)
        .or_else(|| text.find(RENDER_CHILDREN_PLACEHOLDER));
    match anchor {
        Some(pos) => format!("{}{}\n\t{}", &text[..pos], directive, &text[pos..]),
        None => format!("{}\n\n{}", text, directive),
    }
}

struct ScriptZone {
    /// Offset of `<script>`
    start: usize,
    /// Byte range of the zone body, between the delimiters
    body: Range<usize>,
    /// Offset just past `</script>`
    end: usize,
}

fn find_script_zone(text: &str) -> Option<ScriptZone> {
    let start = text.find(SCRIPT_OPEN)?;
    let body_start = start + SCRIPT_OPEN.len();
    let body_end = body_start + text[body_start..].find(SCRIPT_CLOSE)?;
    Some(ScriptZone {
        start,
        body: body_start..body_end,
        end: body_end + SCRIPT_CLOSE.len(),
    })
}

/// Append `children` to a `let { ... } = $props()` destructuring so the
/// layout keeps a child render slot after gaining a sibling unit
///
/// Applies only to runes-style scripts (one of the reactive sentinels
/// present) whose destructuring does not already bind `children`. Every
/// `$props()` occurrence is considered until one sits in a destructuring
/// statement; earlier uses in comments or other expressions are passed
/// over. Returns `None` when there is nothing to rewrite.
fn rewrite_props_children(body: &str) -> Option<String> {
    if !REACTIVE_SENTINELS.iter().any(|s| body.contains(s)) {
        return None;
    }

    let mut search_from = 0;
    while let Some(rel) = body[search_from..].find(PROPS_CALL) {
        let props_pos = search_from + rel;
        if let Some((open, close)) = find_props_destructure(body, props_pos) {
            let names = &body[open + 1..close];
            if has_children_binding(names) {
                return None;
            }
            let kept = names.trim_end();
            let trailing = &names[kept.len()..];
            let mut out = String::with_capacity(body.len() + ", children".len());
            out.push_str(&body[..open + 1]);
            out.push_str(kept);
            out.push_str(", children");
            out.push_str(trailing);
            out.push_str(&body[close..]);
            return Some(out);
        }
        search_from = props_pos + PROPS_CALL.len();
    }
    None
}

/// Locate the brace offsets of a `let { ... } = $props()` statement whose
/// call starts at `props_pos`; `None` when this occurrence is not such a
/// statement
fn find_props_destructure(body: &str, props_pos: usize) -> Option<(usize, usize)> {
    // Walk back across `= ` to the closing brace of the pattern.
    // Every intermediate slice is a prefix of `body`, so the brace offsets
    // index into `body` directly.
    let before = body[..props_pos].trim_end().strip_suffix('=')?.trim_end();
    if !before.ends_with('}') {
        return None;
    }
    let close = before.len() - 1;
    let open = before[..close].rfind('{')?;

    // The pattern must be introduced by a bare `let`
    let head = before[..open].trim_end();
    if !head.ends_with("let") {
        return None;
    }
    if head.len() > 3 {
        let prev = head[..head.len() - 3].chars().next_back()?;
        if prev.is_alphanumeric() || prev == '_' {
            return None;
        }
    }

    Some((open, close))
}

/// True when the destructured names already bind `children`
/// (identifier match, so `childrenCount` does not count)
fn has_children_binding(names: &str) -> bool {
    names.split(',').any(|part| {
        let ident: String = part
            .trim_start()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        ident == "children"
    })
}

fn import_marker(name: &str) -> String {
    format!("<!-- nixtrix:{}:import -->", name)
}

fn render_marker(name: &str) -> String {
    format!("<!-- nixtrix:{}:render -->", name)
}

fn existence_marker(name: &str) -> String {
    format!("<!-- nixtrix:{} -->", name)
}

/// Insert a self-contained, sentinel-delimited block for the unit
///
/// Blocks are keyed by unit name, so blocks for different units never
/// collide and a re-run for the same unit is a no-op. The standalone
/// `<!-- nixtrix:<name> -->` form is also honored as an existence marker,
/// so a hand-annotated template is left alone.
fn marker_block(template: &str, name: &str, binding: &ImportBinding) -> InjectReport {
    if template.contains(&import_marker(name)) || template.contains(&existence_marker(name)) {
        return InjectReport {
            text: template.to_string(),
            import: EditOutcome::AlreadyPresent,
            render: EditOutcome::AlreadyPresent,
        };
    }

    let block = format!(
        "{}\n{}\n  {}\n{}\n{}\n{}\n{}",
        import_marker(name),
        SCRIPT_OPEN,
        binding.import_statement(),
        SCRIPT_CLOSE,
        render_marker(name),
        binding.render_directive(),
        MARKER_END
    );

    let text = if let Some(slot) = find_slot(template) {
        format!(
            "{}{}\n\t{}",
            &template[..slot.start],
            block,
            &template[slot.start..]
        )
    } else if let Some(tag) = find_first_open_tag(template) {
        format!(
            "{}\n\t{}{}",
            &template[..tag.end],
            block,
            &template[tag.end..]
        )
    } else {
        format!("{}\n\n{}", template, block)
    };

    InjectReport {
        text,
        import: EditOutcome::Inserted,
        render: EditOutcome::Inserted,
    }
}

/// Find the first self-closing slot tag, tolerating internal whitespace
/// (`<slot/>`, `<slot />`, ...)
fn find_slot(text: &str) -> Option<Range<usize>> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find("<slot") {
        let start = search_from + rel;
        let tail = &text[start + "<slot".len()..];
        let after_ws = tail.trim_start();
        if after_ws.starts_with("/>") {
            let ws_len = tail.len() - after_ws.len();
            return Some(start..start + "<slot".len() + ws_len + "/>".len());
        }
        search_from = start + "<slot".len();
    }
    None
}

/// Find the template's first opening tag: `<`, an ASCII letter, anything up
/// to the next `>`
fn find_first_open_tag(text: &str) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        if bytes[i] == b'<' && bytes[i + 1].is_ascii_alphabetic() {
            let close = text[i..].find('>')?;
            return Some(i..i + close + 1);
        }
    }
    None
}
