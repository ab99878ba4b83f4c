//! Bash integration.

use crate::app::{COMPLETION_SCRIPT, GENERATE_COMPLETION};

const SCRIPT_TEMPLATE: &str = r#"# Usage: eval "$(@PROG@ @SCRIPT@)"
@FUNC@() {
    local cur args opts
    COMPREPLY=()
    cur="${COMP_WORDS[COMP_CWORD]}"
    COMP_WORDS+=("")
    args=("${COMP_WORDS[0]}" "@GENERATE@" "${COMP_WORDBREAKS}" "${COMP_WORDS[@]:1:$COMP_CWORD}")
    opts=$("${args[@]}")
    local IFS=$'\n'
    COMPREPLY=($(compgen -W "${opts}"))
    return 0
}
complete -o nospace -F @FUNC@ @PROG@
"#;

/// Bash script wiring tab completion for `name` back into the program itself.
///
/// The shell re-invokes the program with the completion marker, its word-break
/// characters and every word up to the cursor.
pub fn completion_script(name: &str) -> String {
    let ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    SCRIPT_TEMPLATE
        .replace("@FUNC@", &format!("_{ident}_bash_autocomplete"))
        .replace("@PROG@", name)
        .replace("@SCRIPT@", COMPLETION_SCRIPT)
        .replace("@GENERATE@", GENERATE_COMPLETION)
}
