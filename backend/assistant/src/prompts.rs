//! Fixed prompt templates.

/// System prompt for code/text generation.
pub fn assistant_system_prompt() -> String {
    "\
You are an expert assistant for scientific data analysis in notebooks. \
You write Python code for the user's notebook environment.

When the user asks for code, answer with exactly one fenced ```python code \
block followed by a short explanation of what the code does. When the user \
asks a general question, answer in plain text without a code block."
        .to_string()
}

/// The classification prompt: embeds the user request and the four task-kind
/// definitions, and asks for the bare number.
pub fn task_selection_prompt(user_input: &str) -> String {
    format!(
        "\
Given the following prompt, decide which of the following types of tasks we need to perform:
1. Code generation: The prompt asks for code to be generated.
2. Text response: The prompt asks for a text response.
3. Notebook generation: The prompt asks explicitly for a notebook to be generated. \
Only choose this if the prompt explicitly asks for creating a new notebook.
4. Notebook modification: The prompt asks for a modification of an existing notebook. \
Only choose this if the prompt explicitly asks for modifying an existing notebook and a notebook filename is given.

This is the prompt:
{user_input}

Now, write the number of the task type into the next cell. Print the number only."
    )
}

/// Follow-up turn that tells the model about a bound image variable; the
/// model is only expected to acknowledge.
pub fn image_context_prompt(variable_name: &str, description: &str) -> String {
    format!(
        "Assume there is an image stored in variable `{variable_name}`. \
The image can be described like this: {description}. Just confirm this with 'ok'."
    )
}

/// The fixed prompt wrapped around a cell by the `doc` command.
pub fn documentation_prompt(code: &str) -> String {
    format!(
        "\
Please write comments in the following code.
Put comments on new lines before the code block you describe.
If there are functions in the code, add numpy-style docstrings.

```python
{code}
```"
    )
}

/// One-time informational banner shown after initialization.
pub fn banner_html(model: &str, vision_model: &str, endpoint: &str) -> String {
    format!(
        "\
<div style=\"font-size:7pt\">
This notebook may contain text, code and images generated by artificial intelligence.
Used model: {model}, vision model: {vision_model}, endpoint: {endpoint}, cellmate version: {version}.
</div>",
        version = env!("CARGO_PKG_VERSION"),
    )
}
