//! Fixed reply texts used by the local responder.

/// Keyword categories in match order; the first keyword found in the
/// lower-cased message wins.
pub const KEYWORD_REPLIES: [(&str, &str); 4] = [
    ("loop", LOOP_REPLY),
    ("list", LIST_REPLY),
    ("function", FUNCTION_REPLY),
    ("syntax", SYNTAX_REPLY),
];

pub const LOOP_REPLY: &str = r#"I see you're working with loops! Let me explain the common issues:

**Common Loop Errors:**
1. **Off-by-one errors**: Using `range(n)` vs `range(n+1)`
2. **Infinite loops**: Missing or incorrect loop conditions
3. **Index out of range**: Accessing elements beyond list boundaries

Let's analyze your code step-by-step. What specific issue are you encountering?"#;

pub const LIST_REPLY: &str = r#"Working with Python lists, I see! Here's what might be causing issues:

**Common List Problems:**
1. **Index errors**: `list[i]` where `i >= len(list)`
2. **Modifying while iterating**: Changing list size during iteration
3. **Reference vs Copy**: Using `=` instead of `copy()`

```python
# Wrong
my_list = original_list  # Reference

# Right
my_list = original_list.copy()  # Independent copy
```

Would you like me to review your specific code?"#;

pub const FUNCTION_REPLY: &str = r#"Let's debug this function together!

**Common Function Issues:**
1. **Missing return statement**: Function returns `None` implicitly
2. **Variable scope**: Using local variables incorrectly
3. **Parameter mismatch**: Wrong number or type of arguments

```python
def calculate_sum(numbers):
    total = 0
    for num in numbers:
        total += num
    return total  # Don't forget this!
```

Share your function code and I'll help identify the bug!"#;

pub const SYNTAX_REPLY: &str = r#"Syntax errors can be tricky! Let me help you identify the issue.

**Most Common Syntax Errors:**
1. **Missing colons**: `if condition` → `if condition:`
2. **Incorrect indentation**: Python requires consistent spacing
3. **Mismatched brackets**: `[`, `{`, `(` must be closed properly
4. **Invalid variable names**: Can't start with numbers or use keywords

```python
# Wrong
if x > 10
    print("Large")

# Right
if x > 10:
    print("Large")
```

Paste your code and I'll spot the syntax error!"#;

pub const DEFAULT_REPLY: &str = r#"Hello! I'm PyTutor AI, your intelligent debugging assistant.

I'm here to help you:
- **Debug Python code** with step-by-step explanations
- **Understand errors** through explainable AI
- **Learn best practices** for cleaner code
- **Practice** with targeted debugging challenges

**Quick Start:**
1. Paste your buggy code
2. Ask me specific questions
3. Toggle "Deep Explain" for detailed AI insights

What would you like to work on today?"#;

pub const EMPTY_CODE_REPLY: &str =
    "I don't see any code. Please paste your Python code and I'll analyze it!";

pub const ANALYSIS_HEADER: &str = "**Code Analysis Results:**";

pub const ANALYSIS_FOLLOW_UP: &str = "Would you like me to explain how to fix these issues?";

/// Summary for code where no diagnostics fired.
pub fn looks_fine(line_count: usize) -> String {
    format!(
        "**Code Analysis:**

Your code structure looks good! Here are some observations:
- {line_count} lines of code
- Proper syntax structure detected

If you're experiencing a specific error, please let me know:
1. What error message you're seeing
2. What you expected to happen
3. What actually happened

I'm here to help!"
    )
}
