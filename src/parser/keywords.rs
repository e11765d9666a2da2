/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the PROSE programming language project.
 *
 * PROSE is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

/// Determines whether a word **ends a greedily collected phrase**.
///
/// Prose has no reserved words: any word can start a variable name or a
/// bare-text phrase. When the parser collects words for such a phrase it
/// keeps going until it meets one of these, so that in
///
/// ```text
/// Let greeting be hello there plus name.
/// ```
///
/// the phrase `hello there` stops at `plus`.
///
/// # Parameters
/// - `word`: a word, in any case
///
/// # Returns
/// - `true` if the word belongs to the sentence grammar.
/// - `false` if it can continue a phrase.
pub fn is_stop_word(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        // arithmetic and comparison
        "plus" | "minus" | "times" | "divided" | "modulo" | "is" | "equals" |
        "greater" | "less" | "equal" | "not" | "than" | "contains" | "as" |
        "has" | "exists" |
        // block structure
        "then" | "do" | "following" | "end" | "otherwise" | "and" | "or" |
        "with" | "that" | "does" | "takes" | "back" | "gives" |
        // statement starters
        "repeat" | "while" | "if" | "give" | "define" | "call" | "ask" |
        "say" | "display" | "let" | "add" | "remove" | "stop" | "skip" |
        "sort" | "set" | "check" | "when" | "test" | "assert" | "run" |
        // connecting words
        "be" | "to" | "of" | "result" | "calling" | "called" | "user" |
        "for" | "each" | "in" | "from" | "by" | "on" | "over" | "where" |
        "containing" | "parameters" | "a" | "an" |
        // builtins
        "item" | "length" | "uppercase" | "lowercase" | "error" | "split" |
        "join" | "replace" | "trim" | "round" | "absolute" | "value" |
        "square" | "root" | "floor" | "ceiling" | "random" | "number" |
        "between" | "minimum" | "maximum" | "power" | "index" | "places" |
        "place" | "dictionary" | "keys" | "json" | "parsed" | "fetching" |
        "posting" | "payload" | "url" | "mapping" | "filtering" | "matching" |
        "pattern" | "command" | "arguments" | "environment" | "variable" |
        // definitions
        "function" | "class" | "method" | "properties" | "new" | "extends" |
        "enum" | "values" | "tests"
    )
}

/// Words that cannot be the operand of `item N of` / `character N of`.
///
/// Seeing one right after `item` means the word `item` is a plain variable:
/// `If item is greater than 3 ...`.
pub fn is_operator_word(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "is" | "equals" | "has" | "and" | "or" | "plus" | "minus" | "times" |
        "divided" | "modulo"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_words_stop_phrases() {
        assert!(is_stop_word("plus"));
        assert!(is_stop_word("Then"));
        assert!(is_stop_word("WHERE"));
    }

    #[test]
    fn ordinary_words_continue_phrases() {
        assert!(!is_stop_word("hello"));
        assert!(!is_stop_word("name"));
        assert!(!is_stop_word("true"));
    }
}
