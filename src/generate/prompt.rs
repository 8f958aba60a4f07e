/// Render the prompt for chunk `index` (zero-based).
///
/// `previous` is the documentation produced for the chunk before; it is empty
/// for the first chunk and after a failed call.
pub fn build_prompt(index: usize, previous: &str, chunk: &str) -> String {
    let mut prompt = String::with_capacity(previous.len() + chunk.len() + 1024);

    prompt.push_str(&format!(
        "This is the documentation you produced for the codebase so far, up to chunk {}:\n",
        index
    ));
    if previous.trim().is_empty() {
        prompt.push_str("(none yet)\n");
    } else {
        prompt.push_str(previous);
        prompt.push('\n');
    }

    prompt.push_str("\n====\n\n");
    prompt.push_str(
        "You are an expert technical writer producing developer documentation. \
         Analyze the chunk below and merge what you learn into the documentation above. \
         Don't leave anything out.\n\n",
    );
    prompt.push_str(
        "Analyze this segment of a large codebase and write detailed developer documentation \
         in Markdown. Include:\n",
    );
    prompt.push_str("- Key functions/classes with their parameters\n");
    prompt.push_str("- Detailed usage examples\n");
    prompt.push_str("- Architecture insights\n\n");
    prompt.push_str(
        "Treat this as documentation for a serious project: keep it well organized and thorough.\n\n",
    );

    prompt.push_str(&format!("Chunk {}:\n", index + 1));
    prompt.push_str(chunk);
    prompt.push('\n');

    prompt
}
