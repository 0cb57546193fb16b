use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use vimstack::diagnostics::FunctionIndexCache;
use vimstack::errors::IndexError;
use vimstack::index::{FunctionIndexer, FunctionLines, VimScriptIndexer, index_source};

const PLUGIN: &str = r#"" plugin header
scriptencoding utf-8

function! plugin#start() abort
  call s:helper()
endfunction

function! s:helper() abort
  function! Inner() closure
    return 1
  endfunction
  return Inner()
endfunction

let s:d = {}
function! s:d.f() abort dict
  return 1
endfunc

fu! <SID>legacy(...)
endf

" function! Commented()
" endfunction
"#;

fn temp_script(content: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be valid")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("vimstack-index-{unique}.vim"));
    fs::write(&path, content).expect("temporary script should be written");
    path
}

#[test]
fn indexes_definition_lines() {
    let funcs = index_source(PLUGIN).expect("plugin should index");
    assert_eq!(funcs.get("plugin#start"), Some(&4));
    assert_eq!(funcs.get("s:helper"), Some(&8));
    assert_eq!(funcs.get("Inner"), Some(&9));
    assert_eq!(funcs.get("s:legacy"), Some(&20));
    assert_eq!(funcs.get("s:d.f"), None);
    assert_eq!(funcs.get("Commented"), None);
    assert_eq!(funcs.len(), 4);
}

#[test]
fn later_definitions_win() {
    let source = "if has('nvim')\n  function! F()\n  endfunction\nelse\n  function! F()\n  endfunction\nendif\n";
    let funcs = index_source(source).expect("source should index");
    assert_eq!(funcs.get("F"), Some(&5));
}

#[test]
fn unbalanced_sources_fail() {
    assert!(matches!(
        index_source("endfunction\n"),
        Err(IndexError::UnmatchedEnd { line: 1 })
    ));
    assert!(matches!(
        index_source("\nfunction! F()\n  return 1\n"),
        Err(IndexError::Unterminated { ref name, line: 2 }) if name == "F"
    ));
}

#[test]
fn indexer_reports_missing_files() {
    let err = VimScriptIndexer
        .index(Path::new("/nonexistent/vimstack/missing.vim"))
        .expect_err("missing file should fail");
    assert!(matches!(err, IndexError::Io { .. }));
}

#[test]
fn cache_returns_empty_table_for_unindexable_files() {
    let cache = FunctionIndexCache::default();
    let missing = Path::new("/nonexistent/vimstack/missing.vim");
    assert!(cache.lookup(missing).is_empty());
    assert_eq!(cache.definition_line("F", missing), 0);

    let broken = temp_script("function! F()\n");
    assert_eq!(cache.definition_line("F", &broken), 0);
    fs::remove_file(broken).expect("temporary script should be cleaned up");
}

#[test]
fn cache_reset_forces_reindexing() {
    let path = temp_script(PLUGIN);
    let cache = FunctionIndexCache::default();
    assert_eq!(cache.definition_line("s:helper", &path), 8);
    assert_eq!(cache.len(), 1);
    cache.reset();
    assert!(cache.is_empty());
    assert_eq!(cache.definition_line("plugin#start", &path), 4);
    fs::remove_file(path).expect("temporary script should be cleaned up");
}

struct SlowIndexer {
    calls: Arc<AtomicUsize>,
}

impl FunctionIndexer for SlowIndexer {
    fn index(&self, _path: &Path) -> Result<FunctionLines, IndexError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        thread::yield_now();
        let mut funcs = FunctionLines::new();
        funcs.insert("F".to_string(), 10 + call);
        Ok(funcs)
    }
}

#[test]
fn concurrent_lookups_agree_on_first_populated_table() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = Arc::new(FunctionIndexCache::new(Arc::new(SlowIndexer {
        calls: Arc::clone(&calls),
    })));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.definition_line("F", Path::new("/shared.vim")))
        })
        .collect();
    let lines: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("lookup thread should not panic"))
        .collect();

    assert_eq!(cache.len(), 1);
    let stored = cache.definition_line("F", Path::new("/shared.vim"));
    assert!(lines.iter().all(|&line| line == stored), "{lines:?} vs {stored}");
    assert!(calls.load(Ordering::SeqCst) >= 1);
}
