use serde_json::{Value, json};
use sitecraft_core::SectionType;

/// Combine the project type and the idea into the user prompt.
///
/// Both values are embedded verbatim.
pub fn compose_prompt(project_type: &str, idea: &str) -> String {
    format!("Project type: {}. Details: {}", project_type, idea)
}

/// The full instruction sent to the model for a user prompt
pub fn instruction(prompt: &str, language: &str) -> String {
    format!(
        r#"You are a highly creative and innovative {language} web designer and consultant.
The user will provide a basic idea for a website.

YOUR TASK:
1. Analyze the user's idea: "{prompt}".
2. EXPAND on this idea creatively. Do not just strictly follow what they said. Invent new features, catchy marketing copy, and professional structures that make sense for this type of site.
3. Create a catchy Site Name if they didn't provide one.
4. Generate a complete website structure including navigation, color palette, and high-quality {language} content for 3-5 pages.

Ensure the content is in {language} and culturally appropriate.
The output must strictly follow the JSON schema provided.
The 'type' of sections must correspond to standard web components like Hero, Features, About, etc.
"#
    )
}

/// Response schema in the provider's OpenAPI subset.
///
/// Mirrors `GeneratedSite`: the provider enforces it, nothing here validates it.
pub fn response_schema() -> Value {
    let section_types: Vec<&str> = SectionType::KNOWN.iter().map(|t| t.as_str()).collect();

    let palette = json!({
        "type": "OBJECT",
        "properties": {
            "primary": { "type": "STRING", "description": "Main brand color (Hex code)" },
            "secondary": { "type": "STRING", "description": "Secondary brand color (Hex code)" },
            "background": { "type": "STRING", "description": "Background color (Hex code, usually light)" },
            "text": { "type": "STRING", "description": "Text color (Hex code, usually dark)" },
            "accent": { "type": "STRING", "description": "Accent color for buttons/highlights" }
        },
        "required": ["primary", "secondary", "background", "text", "accent"]
    });

    let content = json!({
        "type": "OBJECT",
        "properties": {
            "headline": { "type": "STRING" },
            "subheadline": { "type": "STRING" },
            "bodyText": { "type": "STRING" },
            "ctaButtonText": { "type": "STRING" },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "iconName": {
                            "type": "STRING",
                            "description": "A suggested icon name (e.g., 'star', 'user', 'settings') representing the item"
                        }
                    }
                }
            }
        },
        "required": ["headline"]
    });

    let section = json!({
        "type": "OBJECT",
        "properties": {
            "type": { "type": "STRING", "enum": section_types },
            "content": content
        },
        "required": ["type", "content"]
    });

    let page = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "slug": { "type": "STRING" },
            "sections": { "type": "ARRAY", "items": section }
        },
        "required": ["title", "slug", "sections"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "siteName": { "type": "STRING" },
            "tagline": { "type": "STRING" },
            "description": { "type": "STRING" },
            "palette": palette,
            "pages": { "type": "ARRAY", "items": page }
        },
        "required": ["siteName", "palette", "pages", "tagline"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_prompt_embeds_inputs_verbatim() {
        let prompt = compose_prompt("business", "bakery website");
        assert!(prompt.contains("business"));
        assert!(prompt.contains("bakery website"));
    }

    #[test]
    fn test_instruction_embeds_prompt_and_language() {
        let text = instruction("Project type: store. Details: vintage lamps", "English");
        assert!(text.contains("\"Project type: store. Details: vintage lamps\""));
        assert!(text.contains("English content for 3-5 pages"));
        assert!(text.contains("Create a catchy Site Name"));
    }

    #[test]
    fn test_schema_section_enum_matches_known_types() {
        let schema = response_schema();
        let types = &schema["properties"]["pages"]["items"]["properties"]["sections"]["items"]
            ["properties"]["type"]["enum"];
        assert_eq!(
            types,
            &json!(["hero", "features", "about", "testimonials", "contact", "gallery", "faq"])
        );
    }

    #[test]
    fn test_schema_required_fields() {
        let schema = response_schema();
        assert_eq!(
            schema["required"],
            json!(["siteName", "palette", "pages", "tagline"])
        );
        assert_eq!(
            schema["properties"]["palette"]["required"]
                .as_array()
                .map(Vec::len),
            Some(5)
        );
    }
}
