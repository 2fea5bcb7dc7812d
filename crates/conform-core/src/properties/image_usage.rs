//! image-usage property (P009): images go through `next/image` with a size

use crate::declare_property;
use crate::navigator::has_jsx_attr;
use crate::parser::SourceFile;
use crate::properties::helpers::{element_line, element_name, for_each_jsx_element};
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

declare_property!(
    ImageUsage,
    id = "P009",
    name = "image-usage",
    description = "Images must use the optimized Image component with explicit dimensions",
    category = Rendering,
    pattern = "{app,components}/**/*.tsx",
    rule = "Native <img> elements are not allowed. An <Image> needs both width and height, or fill.",
    examples = "// Bad\n<img src=\"/hero.png\" />\n<Image src={hero} alt=\"\" />\n\n// Good\n<Image src={hero} alt=\"\" width={640} height={320} />\n<Image src={hero} alt=\"\" fill />"
);

impl Property for ImageUsage {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let visitor_ctx = VisitorContext::new(file);
        let mut violations = Vec::new();

        for_each_jsx_element(module, &visitor_ctx, |element| {
            let opening = &element.opening;
            let message = match element_name(element).as_str() {
                "img" => "Use the Image component from next/image instead of <img>",
                "Image" => {
                    let sized = has_jsx_attr(opening, "width") && has_jsx_attr(opening, "height");
                    if sized || has_jsx_attr(opening, "fill") {
                        return;
                    }
                    "<Image> needs width and height, or fill"
                }
                _ => return,
            };
            violations.push(ctx.violation(element_line(element, &visitor_ctx), message));
        });

        sort_violations(&mut violations);
        violations
    }
}
