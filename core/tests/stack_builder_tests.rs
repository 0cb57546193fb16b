use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use vimstack::errors::{IndexError, IntrospectionError, StackError};
use vimstack::index::{FunctionIndexer, FunctionLines, VimScriptIndexer};
use vimstack::{Frame, Runtime, Session};

const SCRIPT: &str = r#"function! F() abort
  let l:G = {-> s:test()}
  return l:G()
endfunction

function! s:test() abort
  return s:d.f()
endfunction
"#;

#[derive(Default)]
struct FakeRuntime {
    dumps: HashMap<String, String>,
    sfile: Option<String>,
}

impl Runtime for FakeRuntime {
    fn eval_string(&self, expr: &str) -> Result<String, IntrospectionError> {
        match expr {
            "expand('<sfile>')" => self
                .sfile
                .clone()
                .ok_or_else(|| IntrospectionError::failed(expr, "E498: no :source file name")),
            _ => Err(IntrospectionError::failed(expr, "unexpected expression")),
        }
    }

    fn describe_function(&self, name: &str) -> Result<String, IntrospectionError> {
        self.dumps.get(name).cloned().ok_or_else(|| {
            IntrospectionError::failed(
                format!(":verbose function {name}"),
                format!("E123: Undefined function: {name}"),
            )
        })
    }
}

struct CountingIndexer {
    calls: Arc<AtomicUsize>,
}

impl FunctionIndexer for CountingIndexer {
    fn index(&self, path: &Path) -> Result<FunctionLines, IndexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        VimScriptIndexer.index(path)
    }
}

fn temp_script(name: &str, content: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be valid")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("vimstack-{name}-{unique}.vim"));
    fs::write(&path, content).expect("temporary script should be written");
    path
}

fn dumps_for(last_set_from: &str) -> HashMap<String, String> {
    let mut dumps = HashMap::new();
    dumps.insert(
        "F".to_string(),
        format!(
            "\n   function F() abort\n\tLast set from {last_set_from}\n1    let l:G = {{-> s:test()}}\n2    return l:G()\n   endfunction"
        ),
    );
    dumps.insert(
        "<SNR>13_test".to_string(),
        format!(
            "\n   function <SNR>13_test() abort\n\tLast set from {last_set_from} line 6\n1    return s:d.f()\n   endfunction"
        ),
    );
    dumps
}

#[test]
fn degraded_frames_keep_chain_information() {
    let session = Session::builder().build(FakeRuntime::default());
    let stacktrace = session
        .build("function F[5]..<lambda>3[1]..G[2]")
        .expect("well-formed chain should build");

    let expected: Vec<Frame> = [("F", 5), ("<lambda>3", 1), ("G", 2)]
        .into_iter()
        .map(|(name, flnum)| Frame::function(name, flnum))
        .collect();
    assert_eq!(stacktrace.frames(), expected.as_slice());
    assert_eq!(stacktrace.frames()[0].text, "F:5:");
    assert_eq!(stacktrace.frames()[1].text, "<lambda>3:1:");
    assert_eq!(stacktrace.frames()[2].text, "G:2:");
    for frame in stacktrace.frames() {
        assert!(frame.filename.is_empty());
        assert!(frame.line.is_empty());
        assert_eq!(frame.lnum, 0);
    }
}

#[test]
fn numeric_function_ids_are_braced() {
    let session = Session::builder().build(FakeRuntime::default());
    let stacktrace = session
        .build("function 14[14]")
        .expect("numeric chain should build");
    assert_eq!(stacktrace.frames(), &[Frame::function("{14}", 14)]);
    assert_eq!(stacktrace.frames()[0].text, "{14}:14:");
}

#[test]
fn malformed_link_without_line_is_tolerated() {
    let session = Session::builder().build(FakeRuntime::default());
    let stacktrace = session
        .build("function <SNR>13_test3")
        .expect("legacy chain should build");
    assert_eq!(stacktrace.frames(), &[Frame::function("<SNR>13_test3", 0)]);
    assert_eq!(stacktrace.frames()[0].text, "<SNR>13_test3:0:");
}

#[test]
fn resolves_frames_against_dump_and_source() {
    let path = temp_script("resolve", SCRIPT);
    let runtime = FakeRuntime {
        dumps: dumps_for(&path.display().to_string()),
        ..FakeRuntime::default()
    };
    let session = Session::builder().build(runtime);

    let stacktrace = session
        .build("function F[2]..<lambda>1[1]..<SNR>13_test, line 1")
        .expect("chain should build");
    let frames = stacktrace.frames();
    let filename = path.display().to_string();

    assert_eq!(frames.len(), 3);
    assert_eq!(
        frames[0],
        Frame {
            funcname: "F".into(),
            flnum: 2,
            line: "  return l:G()".into(),
            filename: filename.clone(),
            lnum: 3,
            text: "F:2:  return l:G()".into(),
        }
    );
    assert_eq!(frames[1], Frame::function("<lambda>1", 1));
    assert_eq!(
        frames[2],
        Frame {
            funcname: "<SNR>13_test".into(),
            flnum: 1,
            line: "  return s:d.f()".into(),
            filename,
            lnum: 7,
            text: "<SNR>13_test:1:  return s:d.f()".into(),
        }
    );

    let source: Vec<&str> = SCRIPT.lines().collect();
    assert_eq!(source[frames[0].lnum - 1], frames[0].line);
    assert_eq!(source[frames[2].lnum - 1], frames[2].line);

    fs::remove_file(path).expect("temporary script should be cleaned up");
}

#[test]
fn expands_home_in_last_set_from() {
    let path = temp_script("home", SCRIPT);
    let file_name = path
        .file_name()
        .expect("temp script should have a file name")
        .to_string_lossy()
        .into_owned();
    let runtime = FakeRuntime {
        dumps: dumps_for(&format!("~/{file_name}")),
        ..FakeRuntime::default()
    };
    let session = Session::builder()
        .with_home_dir(std::env::temp_dir())
        .build(runtime);

    let stacktrace = session.build("function F[2]").expect("chain should build");
    let frame = &stacktrace.frames()[0];
    assert_eq!(PathBuf::from(&frame.filename), path);
    assert_eq!(frame.lnum, 3);

    fs::remove_file(path).expect("temporary script should be cleaned up");
}

#[test]
fn unknown_source_file_leaves_lnum_unset() {
    let runtime = FakeRuntime {
        dumps: dumps_for("/nonexistent/vimstack/plugin.vim"),
        ..FakeRuntime::default()
    };
    let session = Session::builder().build(runtime);
    let stacktrace = session.build("function F[1]").expect("chain should build");
    let frame = &stacktrace.frames()[0];
    assert_eq!(frame.filename, "/nonexistent/vimstack/plugin.vim");
    assert_eq!(frame.line, "  let l:G = {-> s:test()}");
    assert_eq!(frame.lnum, 0);
}

#[test]
fn function_index_is_cached_per_chain() {
    let path = temp_script("cache", SCRIPT);
    let calls = Arc::new(AtomicUsize::new(0));
    let runtime = FakeRuntime {
        dumps: dumps_for(&path.display().to_string()),
        ..FakeRuntime::default()
    };
    let session = Session::builder()
        .with_indexer(CountingIndexer {
            calls: Arc::clone(&calls),
        })
        .build(runtime);

    session
        .build("function F[2]..<SNR>13_test[1]")
        .expect("chain should build");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.stack_builder().cache().len(), 1);

    session.build("function F[3]").expect("chain should build");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    fs::remove_file(path).expect("temporary script should be cleaned up");
}

#[test]
fn builds_file_frames_from_disk() {
    let path = temp_script("file", "echo 1\nthrow 'boom'\n");
    let session = Session::builder().build(FakeRuntime::default());

    let stacktrace = session
        .build(&format!("{}, line 2", path.display()))
        .expect("file position should build");
    assert_eq!(
        stacktrace.frames(),
        &[Frame {
            filename: path.display().to_string(),
            lnum: 2,
            line: "throw 'boom'".into(),
            text: "throw 'boom'".into(),
            ..Frame::default()
        }]
    );

    fs::remove_file(path).expect("temporary script should be cleaned up");
}

#[test]
fn unreadable_file_frame_keeps_position() {
    let session = Session::builder().build(FakeRuntime::default());
    let stacktrace = session
        .build("/path/to/file.vim, line 14")
        .expect("file position should build");
    assert_eq!(
        stacktrace.frames(),
        &[Frame::file("/path/to/file.vim", 14)]
    );
}

#[test]
fn invalid_throwpoint_fails_the_build() {
    let session = Session::builder().build(FakeRuntime::default());
    let err = session
        .build("not a throwpoint")
        .expect_err("garbage should be rejected");
    assert!(matches!(err, StackError::InvalidThrowpoint { .. }));
}

#[test]
fn callstack_drops_the_querying_frame() {
    let runtime = FakeRuntime {
        sfile: Some("function Main[2]..F[3]..stacktrace#callstack".to_string()),
        ..FakeRuntime::default()
    };
    let session = Session::builder().build(runtime);
    let stacktrace = session.callstack().expect("callstack should build");
    assert_eq!(
        stacktrace.frames(),
        &[Frame::function("Main", 2), Frame::function("F", 3)]
    );
}

#[test]
fn callstack_outside_functions_is_invalid() {
    let runtime = FakeRuntime {
        sfile: Some(String::new()),
        ..FakeRuntime::default()
    };
    let session = Session::builder().build(runtime);
    let err = session.callstack().expect_err("empty chain should be rejected");
    assert!(matches!(err, StackError::InvalidThrowpoint { .. }));
}

#[test]
fn callstack_surfaces_introspection_failures() {
    let session = Session::builder().build(FakeRuntime::default());
    let err = session.callstack().expect_err("sfile query should fail");
    assert!(matches!(
        err,
        StackError::Introspection(IntrospectionError::Failed { .. })
    ));
}

#[test]
fn format_trace_lists_innermost_first() {
    let session = Session::builder().build(FakeRuntime::default());
    let stacktrace = session
        .build("function F[5]..G[2]")
        .expect("chain should build");
    assert_eq!(stacktrace.format_trace(), "    at :0: G:2:\n    at :0: F:5:\n");
}
