#![no_main]

use libfuzzer_sys::fuzz_target;
use depsentry_extractor::PackageCoordinate;

fuzz_target!(|data: &str| {
    // 파싱에 성공한 좌표는 같은 문자열로 다시 렌더링되어야 함
    if let Ok(coordinate) = data.parse::<PackageCoordinate>() {
        let reparsed: PackageCoordinate = coordinate
            .purl()
            .parse()
            .expect("rendered coordinate must parse");
        assert_eq!(reparsed, coordinate);
    }
});
