//! テーブル表示のビューモデル
//!
//! サーバーから取得したレコード一覧（RecordSet）と表示状態（ViewState）から、
//! 検索 → ソート → ページ切り出し の順で表示行（Projection）を導出する。
//!
//! - 検索語の変更: 再フィルタ → 再ソート、ページを1に戻す
//! - ソートの変更: フィルタ済み集合を再ソート、ページを1に戻す
//! - ページサイズ/ページ番号の変更: 切り出しのみ
//! - 作成/更新/削除: RecordStore に委譲し、成功後に全件再取得
//!
//! 降順は「昇順に並べてから反転」で求める。同順位の行も反転される。

use crate::error::{Error, Result, StoreError};
use crate::record::Record;
use crate::store::RecordStore;
use crate::view::{PageInfo, SortDirection, ViewState, PAGE_SIZES};
use std::sync::atomic::{AtomicU64, Ordering};

/// 読み込み要求の番号札
///
/// `begin_load` で発行し、レスポンス到着時に `finish_load` へ渡す。
/// 最後に発行した番号札以外のレスポンスは破棄される。
/// 発行元のビューモデル以外では常に古い番号札として扱う。
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    view: u64,
    seq: u64,
}

static NEXT_VIEW: AtomicU64 = AtomicU64::new(1);

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// RecordSet を置き換えた
    Applied { count: usize },
    /// より新しい読み込みが発行済みのため破棄した
    Superseded,
}

/// 現在表示中の行
#[derive(Debug, Clone)]
pub struct Projection<'a, R> {
    pub rows: Vec<&'a R>,
    /// 検索で絞り込んだ後の件数（ページネーション用）
    pub filtered_count: usize,
    pub page: PageInfo,
}

#[derive(Debug, Clone)]
pub struct TabularViewModel<R: Record> {
    records: Vec<R>,
    state: ViewState,
    /// フィルタ・ソート済みの `records` の添字
    ordered: Vec<usize>,
    /// 番号札の発行元の識別子（複製は同じ値を持つ）
    view: u64,
    issued: u64,
    settled: u64,
    revision: u64,
}

impl<R: Record> Default for TabularViewModel<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> TabularViewModel<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            state: ViewState::new(R::DEFAULT_SORT),
            ordered: Vec::new(),
            view: NEXT_VIEW.fetch_add(1, Ordering::Relaxed),
            issued: 0,
            settled: 0,
            revision: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// 最後に取得したレコード（取得順）
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// 表示内容が変わるたびに増える
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 最新の読み込みが未完了か
    pub fn is_loading(&self) -> bool {
        self.settled < self.issued
    }

    pub fn find(&self, key: &R::Key) -> Option<&R> {
        self.records.iter().find(|r| &r.key() == key)
    }

    // --- 読み込み ---

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        tracing::debug!(seq = self.issued, "load issued");
        LoadTicket {
            view: self.view,
            seq: self.issued,
        }
    }

    /// レスポンスを適用する
    ///
    /// 番号札が最新でなければ結果に関わらず破棄する。
    /// 失敗時は RecordSet を変更せず `FetchFailed` を返す。
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        response: std::result::Result<Vec<R>, StoreError>,
    ) -> Result<LoadOutcome> {
        if ticket.view != self.view {
            tracing::warn!(seq = ticket.seq, "discarding load ticket from another view");
            return Ok(LoadOutcome::Superseded);
        }
        if ticket.seq != self.issued {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding superseded load response"
            );
            return Ok(LoadOutcome::Superseded);
        }
        self.settled = ticket.seq;

        match response {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.refilter();
                tracing::debug!(seq = ticket.seq, count, "load applied");
                Ok(LoadOutcome::Applied { count })
            }
            Err(e) => {
                tracing::warn!(seq = ticket.seq, error = %e, "load failed");
                Err(Error::FetchFailed(e))
            }
        }
    }

    pub async fn load<S>(&mut self, store: &S) -> Result<LoadOutcome>
    where
        S: RecordStore<R> + ?Sized,
    {
        let ticket = self.begin_load();
        let response = store.fetch_all().await;
        self.finish_load(ticket, response)
    }

    /// バックエンドに再取得を依頼してから全件読み込む
    pub async fn refresh<S>(&mut self, store: &S) -> Result<LoadOutcome>
    where
        S: RecordStore<R> + ?Sized,
    {
        store.refresh().await.map_err(Error::FetchFailed)?;
        self.load(store).await
    }

    // --- 変更（成功後に全件再取得） ---

    pub async fn create<S>(&mut self, store: &S, draft: &S::Draft) -> Result<LoadOutcome>
    where
        S: RecordStore<R> + ?Sized,
    {
        store.create(draft).await.map_err(mutation_failed)?;
        self.load(store).await
    }

    pub async fn update<S>(
        &mut self,
        store: &S,
        key: &R::Key,
        patch: &S::Patch,
    ) -> Result<LoadOutcome>
    where
        S: RecordStore<R> + ?Sized,
    {
        store.update(key, patch).await.map_err(mutation_failed)?;
        self.load(store).await
    }

    pub async fn delete<S>(&mut self, store: &S, key: &R::Key) -> Result<LoadOutcome>
    where
        S: RecordStore<R> + ?Sized,
    {
        store.delete(key).await.map_err(mutation_failed)?;
        self.load(store).await
    }

    // --- 表示状態 ---

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.state.page_index = 1;
        self.refilter();
    }

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> Result<()> {
        if !R::has_field(key) {
            return Err(Error::InvalidInput(format!("unknown sort key: {}", key)));
        }
        self.state.sort_key = key.to_string();
        self.state.sort_direction = direction;
        self.state.page_index = 1;
        self.resort();
        Ok(())
    }

    /// 列見出しのクリック: 同じ列なら向きを反転、別の列なら昇順
    pub fn toggle_sort(&mut self, key: &str) -> Result<()> {
        let direction = if self.state.sort_key == key {
            self.state.sort_direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.set_sort(key, direction)
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !PAGE_SIZES.contains(&size) {
            return Err(Error::InvalidInput(format!(
                "page size {} is not one of {:?}",
                size, PAGE_SIZES
            )));
        }
        self.state.page_size = size;
        self.state.page_index = 1;
        self.revision += 1;
        Ok(())
    }

    /// ページ番号を設定する。範囲外でも丸めない（空のページになる）
    pub fn set_page_index(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(Error::InvalidInput("page index starts at 1".to_string()));
        }
        self.state.page_index = page;
        self.revision += 1;
        Ok(())
    }

    // --- 導出 ---

    pub fn filtered_count(&self) -> usize {
        self.ordered.len()
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(
            self.state.page_index,
            self.state.page_size,
            self.ordered.len(),
        )
    }

    pub fn projection(&self) -> Projection<'_, R> {
        let start = self.state.offset().min(self.ordered.len());
        let end = start
            .saturating_add(self.state.page_size)
            .min(self.ordered.len());
        let rows = self.ordered[start..end]
            .iter()
            .map(|&i| &self.records[i])
            .collect();
        Projection {
            rows,
            filtered_count: self.ordered.len(),
            page: self.page_info(),
        }
    }

    /// 表示行を所有権付きで取得（UIシグナル向け）
    pub fn page_rows(&self) -> Vec<R> {
        self.projection().rows.into_iter().cloned().collect()
    }

    fn refilter(&mut self) {
        let needle = self.state.search_term.to_lowercase();
        self.ordered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches(&needle))
            .map(|(i, _)| i)
            .collect();
        self.resort();
    }

    /// 取得順を同順位の決め手にするため、履歴に依存しない
    /// 同順位は取得順で並べる（直前の表示順は引き継がない）
    fn resort(&mut self) {
        let key = self.state.sort_key.as_str();
        let records = &self.records;
        self.ordered.sort_by(|&a, &b| {
            let va = records[a].field(key);
            let vb = records[b].field(key);
            let ord = match (va, vb) {
                (Some(x), Some(y)) => x.cmp_ascending(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            ord.then(a.cmp(&b))
        });
        if self.state.sort_direction == SortDirection::Desc {
            self.ordered.reverse();
        }
        self.revision += 1;
    }
}

fn mutation_failed(e: StoreError) -> Error {
    tracing::warn!(error = %e, "mutation rejected");
    Error::MutationFailed(e)
}
