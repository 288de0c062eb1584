use std::{collections::HashMap, sync::Arc};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// Serves fixed pages keyed by request target (path + query). Anything else is a 404.
/// Returns `http://127.0.0.1:{port}`.
pub async fn serve(pages: HashMap<String, String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let pages = Arc::new(pages);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let pages = pages.clone();
            tokio::spawn(async move {
                let _ = respond(stream, &pages).await;
            });
        }
    });

    format!("http://{addr}")
}

async fn respond(mut stream: TcpStream, pages: &HashMap<String, String>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request = String::from_utf8_lossy(&buf);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let response = match pages.get(target) {
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_owned(),
    };
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

pub fn listing_page(rows: &[(&str, &str, &str)]) -> String {
    let cells: String = rows
        .iter()
        .map(|(code, location, link)| {
            let link = link.replace('&', "&amp;");
            format!(
                r#"<tr>
                  <td class="cislo" headers="t1sa1 t1sb1"><a href="{link}">{code}</a></td>
                  <td class="overflow_name" headers="t1sa1 t1sb2">{location}</td>
                  <td class="center" headers="t1sa2"><a href="{link}">X</a></td>
                </tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <table class="table"><tr><th id="t1sa1">Obec</th></tr>{cells}</table>
        <table class="table"><tr><th id="t2sa1">Obec</th></tr></table>
        </body></html>"#
    )
}

pub fn detail_page(registered: &str, envelopes: &str, valid: &str, parties: &[(&str, &str)]) -> String {
    let (first, second) = parties.split_at(parties.len().div_ceil(2));
    let party_rows = |table: usize, parties: &[(&str, &str)]| -> String {
        parties
            .iter()
            .map(|(name, votes)| {
                format!(
                    r#"<tr>
                      <td class="overflow_name" headers="t{table}sa1 t{table}sb2">{name}</td>
                      <td class="cislo" headers="t{table}sa2 t{table}sb3">{votes}</td>
                    </tr>"#
                )
            })
            .collect()
    };
    format!(
        r#"<html><body>
        <table id="ps311_t1"><tr>
          <td class="cislo" headers="sa2" data-rel="L1">{registered}</td>
          <td class="cislo" headers="sa3" data-rel="L1">{envelopes}</td>
          <td class="cislo" headers="sa6">{valid}</td>
        </tr></table>
        <div class="t2_470"><table>{}</table></div>
        <div class="t2_470"><table>{}</table></div>
        </body></html>"#,
        party_rows(1, first),
        party_rows(2, second),
    )
}
