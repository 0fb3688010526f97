//! Built-in prompt templates as (category, key, template)

pub const BUILTIN_PROMPTS: &[(&str, &str, &str)] = &[
    (
        "embedding",
        "generate",
        "Generate an embedding vector for the following text: '{text}'",
    ),
    (
        "embedding",
        "analyze",
        "Analyze the embedding vector and explain its meaning: {vector}",
    ),
    (
        "similarity_search",
        "query",
        "Find items similar to the following input using a vector database: '{query_text}'",
    ),
    (
        "similarity_search",
        "debug",
        "Explain the similarity search process for input query: '{query_text}' with top_k={top_k}",
    ),
    (
        "system",
        "setup",
        "Configure Pinecone with the API key '{api_key}' and index '{index_name}'.",
    ),
    (
        "system",
        "test_connection",
        "Test the connection to Pinecone with the API key '{api_key}'.",
    ),
    (
        "debugging",
        "error_handling",
        "Given the error '{error_message}', suggest a solution for a Pinecone-related application.",
    ),
    (
        "debugging",
        "validate_index",
        "Validate the setup of Pinecone index '{index_name}' and ensure all embeddings are correctly stored.",
    ),
    ("faq", "best_practices", FAQ_BEST_PRACTICES),
    ("faq", "troubleshooting", FAQ_TROUBLESHOOTING),
    ("faq", "definition", FAQ_DEFINITION),
    ("faq", "general", FAQ_GENERAL),
];

const FAQ_BEST_PRACTICES: &str = "You are a technical expert. Provide a structured, step-by-step guide on:
**{topic}**

Format:
1. **Identify the Issue** - Explain common symptoms or causes.
2. **Step-by-Step Resolution** - Outline best practices to fix the issue.
3. **Preventive Measures** - Recommend ways to avoid the issue in the future.
4. **Resources** - Suggest useful tools or documentation.

Answer:";

const FAQ_TROUBLESHOOTING: &str = "You are a customer support agent assisting a user with the issue:
**{topic}**

Format:
- **Issue Description**: Explain the problem in simple terms.
- **Possible Causes**: List at least 3 potential reasons.
- **Solutions**: Provide step-by-step instructions to fix it.
- **When to Seek Help**: Suggest when to escalate the issue.

Answer:";

const FAQ_DEFINITION: &str = "You are an AI assistant. Provide a **clear and concise definition** for:
**{topic}**

- **Simple Explanation** (for beginners)
- **Technical Explanation** (for advanced users)
- **Examples of Use Cases**

Answer:";

const FAQ_GENERAL: &str = "You are an AI assistant. Answer the following question in a structured manner:

{topic}

Answer:";
