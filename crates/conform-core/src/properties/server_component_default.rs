//! server-component-default property (P006): no needless client components
//!
//! A file that opts into client rendering must show some reason for it: a
//! hook, an event handler prop, or a browser-only global. The checks are
//! textual.

use crate::declare_property;
use crate::detectors::{client_directive_line, has_event_handlers, uses_browser_apis, uses_hooks};
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::Violation;

declare_property!(
    ServerComponentDefault,
    id = "P006",
    name = "server-component-default",
    description = "Components should stay Server Components unless they need the client",
    category = Rendering,
    pattern = "{app,components}/**/*.tsx",
    rule = "A file with a 'use client' directive in its first five lines must use a React hook, an event handler prop or a browser API.",
    examples = "// Bad\n'use client';\nexport function Title() { return <h1>Hello</h1>; }\n\n// Good\n'use client';\nexport function Counter() {\n  const [n, setN] = useState(0);\n  return <button onClick={() => setN(n + 1)}>{n}</button>;\n}"
);

impl Property for ServerComponentDefault {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let text = file.source();
        let Some(line) = client_directive_line(text) else {
            return Vec::new();
        };

        if uses_hooks(text) || has_event_handlers(text) || uses_browser_apis(text) {
            return Vec::new();
        }

        vec![ctx.violation(
            line,
            "'use client' without hooks, event handlers or browser APIs; this can be a Server Component",
        )]
    }
}
