#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use depsentry_extractor::FormatDispatcher;

/// 퍼저용 매니페스트 입력 (형식 선택 + 본문)
#[derive(Arbitrary, Debug)]
struct FuzzManifest {
    format: FuzzFormat,
    content: String,
}

#[derive(Arbitrary, Debug)]
enum FuzzFormat {
    PackageLock,
    Requirements,
    YarnLock,
    Unknown,
}

impl FuzzFormat {
    fn filename(&self) -> &'static str {
        match self {
            FuzzFormat::PackageLock => "fuzz/package-lock.json",
            FuzzFormat::Requirements => "fuzz/requirements.txt",
            FuzzFormat::YarnLock => "fuzz/yarn.lock",
            FuzzFormat::Unknown => "fuzz/Pipfile.lock",
        }
    }
}

fuzz_target!(|input: FuzzManifest| {
    let dispatcher = FormatDispatcher::new();
    let filename = input.format.filename();

    let first = dispatcher.extract(filename, &input.content);
    // 동일 입력은 동일 결과
    let second = dispatcher.extract(filename, &input.content);
    match (first, second) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, b);
            assert!(!a.is_empty());
        }
        (Err(_), Err(_)) => {}
        _ => panic!("extraction is not deterministic"),
    }
});
