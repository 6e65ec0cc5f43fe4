/// Prompt template for the java8to21 analyzer. The placeholders are filled
/// by the prompt builder: {code_class} with the file contents, {file_path}
/// with its repository-relative path, {output_format} with the schema
/// instructions below.
pub const JAVA_MIGRATION_PROMPT: &str = r#"You are a Java expert with deep knowledge of versions 8 and 21.
Your task is to analyze the provided Java 8 source file and identify modernization opportunities for version 21.
The goal is to suggest changes that take advantage of current best practices and the newest language features,
such as lambda expressions, streams, var, switch expressions, records, sealed classes, and other performance and syntax improvements.
If there is more than one suggestion for the same stretch of code, provide the most optimized or the clearest one, at your discretion.
Each file may have several improvements, so analyze every stretch carefully and suggest only one improvement per stretch.

Difficulty Level: a score from 1 to 5, where:

1: Very low difficulty. Simple syntax change (e.g. var).
2: Low difficulty. Direct syntax change (e.g. switch expression).
3: Medium difficulty. Requires moderate refactoring (e.g. conversion to streams).
4: High difficulty. Refactoring that impacts the logic or structure of the class.
5: Very high difficulty. Complex change that may require changes in other parts of the application.

Following these criteria, analyze the code below:

{code_class}

This code lives in the file {file_path}.

{output_format}
"#;

/// Machine-readable description of the expected response, appended to every
/// analyzer prompt in place of {output_format}.
pub const SUGGESTION_FORMAT_INSTRUCTIONS: &str = r#"Respond ONLY with a JSON object matching this schema, with no surrounding prose:

{
  "suggestions": [
    {
      "file_path": "path of the analyzed file",
      "description": "what to change and why",
      "start_line": 1,
      "end_line": 1,
      "original_snippet": "the exact current code",
      "modified_code": "the modernized replacement",
      "difficulty_level": 1,
      "additional_notes": "optional extra context"
    }
  ]
}

Rules:
- "start_line" and "end_line" are 1-based and start_line <= end_line
- "difficulty_level" is an integer from 1 to 5
- "additional_notes" may be omitted
- an empty "suggestions" array is valid when nothing needs modernizing"#;
